use std::time::Duration;

use crate::commands::{executor, handlers};
use crate::events::{Effect, FormCommand, Inquiry, SubmissionEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, FormState};

/// Side effects of the form (production = HTTP + files + browser, test = recorder)
pub trait SubmissionHandler {
    /// Post the inquiry; the outcome comes back as a `SubmissionEvent`
    fn submit(&mut self, inquiry: Inquiry);

    /// Persist the advisory flag
    fn mark_submitted(&mut self);

    /// Deliver `SubmissionEvent::CloseDue` after `delay`
    fn schedule_close(&mut self, delay: Duration);

    fn navigate(&mut self, destination: &str);
}

/// Testable form core without terminal dependencies
///
/// Key input and background results both funnel through the pure executor and
/// reducer; whatever effects they return are handed to `H`.
pub struct AppCore<H: SubmissionHandler> {
    state: FormState,
    handler: H,
}

impl<H: SubmissionHandler> AppCore<H> {
    pub fn new(handler: H, state: FormState) -> Self {
        Self { state, handler }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.state) {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: FormCommand) {
        tracing::debug!("Executing command: {:?}", command);
        let effects = executor::execute_command(command, &mut self.state);
        self.dispatch(effects);
    }

    /// Open the prompt for the configured destination, as if the visitor followed the link
    pub fn open_prompt(&mut self) {
        let destination = self.state.destination.clone();
        self.execute(FormCommand::OpenPrompt { destination });
    }

    pub fn handle_submission_event(&mut self, event: SubmissionEvent) {
        let effects = reducer::reduce_submission_event(&mut self.state, event);
        self.dispatch(effects);
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit(inquiry) => self.handler.submit(inquiry),
                Effect::PersistSubmittedFlag => self.handler.mark_submitted(),
                Effect::ScheduleClose(delay) => self.handler.schedule_close(delay),
                Effect::Navigate(destination) => self.handler.navigate(&destination),
            }
        }
    }
}
