//! Colors and styles shared by the landing view and the inquiry prompt.

use ratatui::style::{Color, Modifier, Style};

use crate::state::Tone;

pub const COLOR_TITLE: Color = Color::Cyan;
pub const COLOR_HELP_TEXT: Color = Color::Gray;
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

// Status messages
pub const COLOR_INFO: Color = Color::Blue;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;

pub const SCREEN_MARGIN: u16 = 2;
pub const TITLE_HEIGHT: u16 = 1;
pub const HELP_BAR_HEIGHT: u16 = 3;
pub const FIELD_HEIGHT: u16 = 3;

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

pub fn form_field_focused_style() -> Style {
    Style::default()
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Info => COLOR_INFO,
        Tone::Success => COLOR_SUCCESS,
        Tone::Error => COLOR_ERROR,
    }
}

pub fn status_style(tone: Tone) -> Style {
    Style::default()
        .fg(tone_color(tone))
        .add_modifier(Modifier::BOLD)
}
