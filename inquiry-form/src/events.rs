use std::time::Duration;

/// Commands produced from key input (user actions → state changes and effects)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Show the inquiry prompt before following `destination`
    OpenPrompt { destination: Option<String> },
    ClosePrompt,

    // Editing
    AppendChar(char),
    DeleteChar,
    NavigateField { forward: bool },

    Submit,
    Quit,
}

/// Results arriving from background work (network replies, timers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// Server answered `{"result": "success"}`
    Accepted,
    /// Server answered, but not with success
    Rejected { detail: String },
    /// No usable answer: transport failure or an undecodable body
    NetworkFailed { detail: String },
    /// Post-success delay elapsed
    CloseDue,
}

/// Validated fields, ready to post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub phone: String,
}

/// Side effects requested by state transitions, carried out by a `SubmissionHandler`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit(Inquiry),
    PersistSubmittedFlag,
    ScheduleClose(Duration),
    Navigate(String),
}
