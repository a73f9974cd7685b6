use crate::events::FormCommand;
use crate::input::{Key, KeyEvent};
use crate::state::{FormState, SubmissionState};

/// Map user input (KeyEvent) to FormCommand based on current form state.
/// Returns None if the key should be ignored.
pub fn handle_key_input(event: KeyEvent, state: &FormState) -> Option<FormCommand> {
    // Ctrl+C always quits
    if event.ctrl && event.key == Key::Char('c') {
        return Some(FormCommand::Quit);
    }

    if state.prompt_visible {
        handle_prompt_keys(event, state)
    } else {
        handle_landing_keys(event.key, state)
    }
}

fn handle_landing_keys(key: Key, state: &FormState) -> Option<FormCommand> {
    match key {
        Key::Enter | Key::Char('o') => Some(FormCommand::OpenPrompt {
            destination: state.destination.clone(),
        }),
        Key::Esc | Key::Char('q') => Some(FormCommand::Quit),
        _ => None,
    }
}

fn handle_prompt_keys(event: KeyEvent, state: &FormState) -> Option<FormCommand> {
    // Waiting for the redirect; only dismissing is allowed
    if state.submission == SubmissionState::Success {
        return match event.key {
            Key::Esc => Some(FormCommand::ClosePrompt),
            _ => None,
        };
    }

    match event.key {
        Key::Esc => Some(FormCommand::ClosePrompt),
        Key::Enter => Some(FormCommand::Submit),
        Key::Tab | Key::Down => Some(FormCommand::NavigateField { forward: true }),
        Key::BackTab | Key::Up => Some(FormCommand::NavigateField { forward: false }),
        Key::Backspace => Some(FormCommand::DeleteChar),
        Key::Char(c) if !event.is_chord() => Some(FormCommand::AppendChar(c)),
        _ => None,
    }
}
