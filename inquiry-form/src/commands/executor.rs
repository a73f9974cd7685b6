use crate::events::{Effect, FormCommand};
use crate::state::validators::{strip_non_digits, validate_form};
use crate::state::{FormField, FormState, StatusMessage, SubmissionState};
use throbber_widgets_tui::ThrobberState;

pub const MSG_SUBMITTING: &str = "Submitting...";

/// Apply a command to the form state, returning the side effects it asks for.
///
/// Pure: no I/O happens here, so the same path runs in the terminal app and in tests.
pub fn execute_command(command: FormCommand, state: &mut FormState) -> Vec<Effect> {
    match command {
        FormCommand::OpenPrompt { destination } => open_prompt(state, destination),

        FormCommand::ClosePrompt => {
            state.prompt_visible = false;
            state.pending_destination = None;
            Vec::new()
        }

        FormCommand::AppendChar(c) => {
            match state.focus {
                FormField::Name => state.name.push(c),
                // Re-sanitize the whole value on every keystroke
                FormField::Phone => {
                    state.phone.push(c);
                    state.phone = strip_non_digits(&state.phone);
                }
            }
            Vec::new()
        }

        FormCommand::DeleteChar => {
            state.focused_value_mut().pop();
            Vec::new()
        }

        FormCommand::NavigateField { .. } => {
            // Two fields: either direction lands on the other one
            state.focus = state.focus.next();
            Vec::new()
        }

        FormCommand::Submit => submit(state),

        FormCommand::Quit => {
            state.should_quit = true;
            Vec::new()
        }
    }
}

fn open_prompt(state: &mut FormState, destination: Option<String>) -> Vec<Effect> {
    if state.already_submitted {
        tracing::info!(?destination, "Inquiry already sent, skipping prompt");
        return match destination {
            Some(destination) => {
                state.navigated_to = Some(destination.clone());
                state.should_quit = true;
                vec![Effect::Navigate(destination)]
            }
            None => Vec::new(),
        };
    }

    state.prompt_visible = true;
    state.pending_destination = destination;
    if !state.is_submitting() {
        state.submission = SubmissionState::Idle;
        state.message = None;
    }
    Vec::new()
}

fn submit(state: &mut FormState) -> Vec<Effect> {
    if state.is_submitting() {
        tracing::debug!("Submit ignored, request already in flight");
        return Vec::new();
    }

    match validate_form(&state.name, &state.phone) {
        Ok(inquiry) => {
            state.submission = SubmissionState::Submitting(ThrobberState::default());
            state.message = Some(StatusMessage::info(MSG_SUBMITTING));
            vec![Effect::Submit(inquiry)]
        }
        Err(message) => {
            state.message = Some(StatusMessage::error(message));
            Vec::new()
        }
    }
}
