use std::time::Duration;

use crate::advisory::SubmittedFlag;
use crate::app_core::{AppCore, SubmissionHandler};
use crate::events::{Inquiry, SubmissionEvent};
use crate::input::{Key, KeyEvent};
use crate::state::FormState;

pub const TEST_DESTINATION: &str = "https://example.edu/brochure.pdf";

/// Handler for tests: records every effect instead of performing it
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub submitted: Vec<Inquiry>,
    pub flag_writes: usize,
    pub scheduled_closes: Vec<Duration>,
    pub navigations: Vec<String>,
    /// When present, `mark_submitted` also writes the real flag file
    pub flag: Option<SubmittedFlag>,
}

impl SubmissionHandler for RecordingHandler {
    fn submit(&mut self, inquiry: Inquiry) {
        self.submitted.push(inquiry);
    }

    fn mark_submitted(&mut self) {
        self.flag_writes += 1;
        if let Some(flag) = &self.flag {
            flag.set().expect("flag file should be writable in tests");
        }
    }

    fn schedule_close(&mut self, delay: Duration) {
        self.scheduled_closes.push(delay);
    }

    fn navigate(&mut self, destination: &str) {
        self.navigations.push(destination.to_string());
    }
}

pub struct TestApp {
    core: AppCore<RecordingHandler>,
}

impl TestApp {
    /// Fresh visitor heading to `TEST_DESTINATION`
    pub fn new() -> Self {
        Self {
            core: AppCore::new(
                RecordingHandler::default(),
                FormState::new(Some(TEST_DESTINATION.to_string()), false),
            ),
        }
    }

    /// Visitor whose advisory flag lives at `flag`, read once here as at start-up
    pub fn with_flag(flag: SubmittedFlag) -> Self {
        let already_submitted = flag.is_set();
        let handler = RecordingHandler {
            flag: Some(flag),
            ..Default::default()
        };

        Self {
            core: AppCore::new(
                handler,
                FormState::new(Some(TEST_DESTINATION.to_string()), already_submitted),
            ),
        }
    }

    pub fn open_prompt(&mut self) {
        self.core.open_prompt();
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type each character into the focused field
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Fill both fields from the top and press Enter
    pub fn fill_and_submit(&mut self, name: &str, phone: &str) {
        self.type_text(name);
        self.send_key(Key::Tab);
        self.type_text(phone);
        self.send_key(Key::Enter);
    }

    /// Inject a background result (server reply, timer)
    pub fn send_event(&mut self, event: SubmissionEvent) {
        self.core.handle_submission_event(event);
    }

    pub fn state(&self) -> &FormState {
        self.core.state()
    }

    pub fn handler(&self) -> &RecordingHandler {
        self.core.handler()
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
