pub mod reducer;
pub mod validators;

use std::time::Duration;
use throbber_widgets_tui::ThrobberState;

pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Phone,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Phone,
            FormField::Phone => FormField::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Phone => "Phone",
        }
    }
}

/// Lifecycle of one submit attempt
#[derive(Default, Debug, Clone, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting(ThrobberState),
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

/// Everything the form renders from. Mutated only by the executor and reducer.
#[derive(Debug, Clone)]
pub struct FormState {
    pub name: String,
    pub phone: String,
    pub focus: FormField,
    pub submission: SubmissionState,
    pub message: Option<StatusMessage>,

    pub prompt_visible: bool,
    /// Configured link the landing view offers
    pub destination: Option<String>,
    /// Link captured when the prompt opened, followed after a successful submit
    pub pending_destination: Option<String>,
    /// Where the visitor was sent, once navigation happened
    pub navigated_to: Option<String>,

    /// Advisory only: suppresses the prompt, never blocks submitting
    pub already_submitted: bool,
    pub redirect_delay: Duration,

    pub should_quit: bool,
}

impl FormState {
    pub fn new(destination: Option<String>, already_submitted: bool) -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            focus: FormField::default(),
            submission: SubmissionState::default(),
            message: None,
            prompt_visible: false,
            destination,
            pending_destination: None,
            navigated_to: None,
            already_submitted,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            should_quit: false,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitting(_))
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
        }
    }

    /// Spinner to advance while a submission is in flight
    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match &mut self.submission {
            SubmissionState::Submitting(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(None, false)
    }
}
