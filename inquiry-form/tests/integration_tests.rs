use inquiry_form::advisory::SubmittedFlag;
use inquiry_form::events::{Inquiry, SubmissionEvent};
use inquiry_form::input::{Key, KeyEvent};
use inquiry_form::state::{FormField, SubmissionState, Tone};
use inquiry_form::testing::{TestApp, TEST_DESTINATION};
use std::time::Duration;

fn scratch_flag() -> SubmittedFlag {
    SubmittedFlag::at(
        std::env::temp_dir()
            .join(format!("inquiry-form-it-{}", uuid::Uuid::new_v4()))
            .join("inquiry_submitted"),
    )
}

#[test]
fn test_quit_from_landing() {
    let mut app = TestApp::new();

    app.assert_not_quit();
    app.send_key(Key::Char('q'));

    app.assert_should_quit();
}

#[test]
fn test_ctrl_c_quits_from_prompt() {
    let mut app = TestApp::new();
    app.open_prompt();

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('c')));

    app.assert_should_quit();
}

#[test]
fn test_tab_switches_field() {
    let mut app = TestApp::new();
    app.open_prompt();
    assert_eq!(app.state().focus, FormField::Name);

    app.send_key(Key::Tab);
    assert_eq!(app.state().focus, FormField::Phone);

    app.send_key(Key::BackTab);
    assert_eq!(app.state().focus, FormField::Name);
}

#[test]
fn test_phone_is_sanitized_while_typing() {
    let mut app = TestApp::new();
    app.open_prompt();
    app.send_key(Key::Tab);

    app.type_text("(912) 345-6789");
    assert_eq!(app.state().phone, "9123456789");

    app.send_key(Key::Backspace);
    assert_eq!(app.state().phone, "912345678");
}

#[test]
fn test_invalid_phone_never_submits() {
    let mut app = TestApp::new();
    app.open_prompt();

    app.fill_and_submit("Asha", "98765");

    assert!(app.handler().submitted.is_empty());
    let message = app.state().message.clone().unwrap();
    assert_eq!(message.text, "Please enter a valid 10-digit phone number.");
    assert_eq!(message.tone, Tone::Error);
}

#[test]
fn test_empty_form_never_submits() {
    let mut app = TestApp::new();
    app.open_prompt();

    app.send_key(Key::Enter);

    assert!(app.handler().submitted.is_empty());
    assert_eq!(
        app.state().message.as_ref().unwrap().text,
        "Please fill in all fields."
    );
}

#[test]
fn test_successful_submission_flow() {
    let mut app = TestApp::new();
    app.open_prompt();
    assert_eq!(app.state().pending_destination.as_deref(), Some(TEST_DESTINATION));

    app.fill_and_submit("Asha", "9123456789");

    assert_eq!(
        app.handler().submitted,
        vec![Inquiry {
            name: "Asha".to_string(),
            phone: "9123456789".to_string(),
        }]
    );
    let message = app.state().message.clone().unwrap();
    assert_eq!(message.text, "Submitting...");
    assert_eq!(message.tone, Tone::Info);

    app.send_event(SubmissionEvent::Accepted);

    assert_eq!(app.state().submission, SubmissionState::Success);
    assert_eq!(
        app.state().message.as_ref().unwrap().text,
        "Message sent successfully!"
    );
    assert_eq!(app.handler().flag_writes, 1);
    assert_eq!(
        app.handler().scheduled_closes,
        vec![Duration::from_millis(1500)]
    );
    // Still showing the confirmation until the delay elapses
    assert!(app.state().prompt_visible);
    assert!(app.handler().navigations.is_empty());

    app.send_event(SubmissionEvent::CloseDue);

    assert!(!app.state().prompt_visible);
    assert_eq!(app.handler().navigations, vec![TEST_DESTINATION.to_string()]);
    app.assert_should_quit();
}

#[test]
fn test_network_failure_keeps_form_editable() {
    let mut app = TestApp::new();
    app.open_prompt();
    app.fill_and_submit("Asha", "9123456789");

    app.send_event(SubmissionEvent::NetworkFailed {
        detail: "connection refused".to_string(),
    });

    let message = app.state().message.clone().unwrap();
    assert_eq!(message.text, "Network error. Please try again.");
    assert_eq!(message.tone, Tone::Error);
    assert_eq!(app.handler().flag_writes, 0);
    assert!(app.state().prompt_visible);
    app.assert_not_quit();

    // Visitor may retry right away
    app.send_key(Key::Enter);
    assert_eq!(app.handler().submitted.len(), 2);
}

#[test]
fn test_server_error_reply_shows_retry_message() {
    let mut app = TestApp::new();
    app.open_prompt();
    app.fill_and_submit("Asha", "9123456789");

    app.send_event(SubmissionEvent::Rejected {
        detail: "Unable to record your submission. Please try again.".to_string(),
    });

    assert_eq!(
        app.state().message.as_ref().unwrap().text,
        "Error submitting form. Please try again."
    );
    assert_eq!(app.state().submission, SubmissionState::Error);
    assert_eq!(app.handler().flag_writes, 0);
}

#[test]
fn test_enter_while_submitting_is_ignored() {
    let mut app = TestApp::new();
    app.open_prompt();
    app.fill_and_submit("Asha", "9123456789");

    app.send_key(Key::Enter);
    app.send_key(Key::Enter);

    assert_eq!(app.handler().submitted.len(), 1);
}

#[test]
fn test_submitted_flag_suppresses_prompt_after_restart() {
    let flag = scratch_flag();

    // First visit: submit successfully
    let mut first = TestApp::with_flag(flag.clone());
    first.open_prompt();
    first.fill_and_submit("Asha", "9123456789");
    first.send_event(SubmissionEvent::Accepted);
    assert!(flag.is_set());

    // Second visit: no prompt, no resubmission, straight to the destination
    let mut second = TestApp::with_flag(flag);
    second.open_prompt();

    assert!(!second.state().prompt_visible);
    assert!(second.handler().submitted.is_empty());
    assert_eq!(second.handler().navigations, vec![TEST_DESTINATION.to_string()]);
}

#[test]
fn test_failed_submission_leaves_flag_unset_for_next_visit() {
    let flag = scratch_flag();

    let mut first = TestApp::with_flag(flag.clone());
    first.open_prompt();
    first.fill_and_submit("Asha", "9123456789");
    first.send_event(SubmissionEvent::NetworkFailed {
        detail: "timeout".to_string(),
    });
    assert!(!flag.is_set());

    let mut second = TestApp::with_flag(flag);
    second.open_prompt();
    assert!(second.state().prompt_visible);
}

#[test]
fn test_closing_prompt_abandons_destination() {
    let mut app = TestApp::new();
    app.open_prompt();

    app.send_key(Key::Esc);

    assert!(!app.state().prompt_visible);
    assert!(app.state().pending_destination.is_none());
    app.assert_not_quit();

    // Reopening from the landing view captures it again
    app.send_key(Key::Enter);
    assert_eq!(app.state().pending_destination.as_deref(), Some(TEST_DESTINATION));
}
