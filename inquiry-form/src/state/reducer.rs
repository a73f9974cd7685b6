use super::{FormState, StatusMessage, SubmissionState};
use crate::events::{Effect, SubmissionEvent};

pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_REJECTED: &str = "Error submitting form. Please try again.";
pub const MSG_NETWORK: &str = "Network error. Please try again.";

/// Pure state transition for results of background work
pub fn reduce_submission_event(state: &mut FormState, event: SubmissionEvent) -> Vec<Effect> {
    match event {
        SubmissionEvent::Accepted => {
            state.submission = SubmissionState::Success;
            state.message = Some(StatusMessage::success(MSG_SENT));
            state.already_submitted = true;
            vec![
                Effect::PersistSubmittedFlag,
                Effect::ScheduleClose(state.redirect_delay),
            ]
        }

        SubmissionEvent::Rejected { detail } => {
            tracing::error!(%detail, "Submission rejected by server");
            state.submission = SubmissionState::Error;
            state.message = Some(StatusMessage::error(MSG_REJECTED));
            Vec::new()
        }

        SubmissionEvent::NetworkFailed { detail } => {
            tracing::error!(%detail, "Submission failed to reach server");
            state.submission = SubmissionState::Error;
            state.message = Some(StatusMessage::error(MSG_NETWORK));
            Vec::new()
        }

        SubmissionEvent::CloseDue => {
            // Only a successful submit schedules a close
            if state.submission != SubmissionState::Success {
                return Vec::new();
            }

            state.prompt_visible = false;
            match state.pending_destination.take() {
                Some(destination) => {
                    state.navigated_to = Some(destination.clone());
                    state.should_quit = true;
                    vec![Effect::Navigate(destination)]
                }
                None => Vec::new(),
            }
        }
    }
}
