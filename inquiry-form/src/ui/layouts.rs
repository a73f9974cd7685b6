use ratatui::layout::{Constraint, Flex, Layout, Rect};

use super::theme::{FIELD_HEIGHT, HELP_BAR_HEIGHT, SCREEN_MARGIN, TITLE_HEIGHT};

/// Prompt box: two bordered fields, a status line, the hint, plus borders and margin
pub const PROMPT_WIDTH: u16 = 60;
pub const PROMPT_HEIGHT: u16 = 2 * FIELD_HEIGHT + 6;

/// Returns [title, content, help]
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(TITLE_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(HELP_BAR_HEIGHT),
    ])
    .margin(SCREEN_MARGIN)
    .areas(area)
}

/// Returns [name, phone, status, hint]
pub fn form_layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .margin(1)
    .areas(area)
}

/// Fixed-size box centered in `area`, shrunk to fit small terminals
pub fn centered_popup(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered() {
        let popup = centered_popup(20, 10, Rect::new(0, 0, 100, 50));

        assert_eq!(popup, Rect::new(40, 20, 20, 10));
    }

    #[test]
    fn popup_never_exceeds_screen() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_popup(PROMPT_WIDTH, PROMPT_HEIGHT, area);

        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
