use ratatui::{
    layout::{Alignment, Rect},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::{FormField, FormState, SubmissionState};
use crate::ui::{layouts, theme};

const HINT: &str = "Tab: switch field  |  Enter: submit  |  Esc: close";

/// The inquiry prompt, drawn over the landing view
pub fn render(f: &mut Frame, state: &FormState) {
    let area = layouts::centered_popup(layouts::PROMPT_WIDTH, layouts::PROMPT_HEIGHT, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title("Request a call back")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [name_area, phone_area, status_area, hint_area] = layouts::form_layout(inner);

    render_field(f, name_area, state, FormField::Name, &state.name);
    render_field(f, phone_area, state, FormField::Phone, &state.phone);
    render_status(f, status_area, state);

    f.render_widget(
        Paragraph::new(HINT)
            .style(theme::help_text_style())
            .alignment(Alignment::Center),
        hint_area,
    );
}

fn render_field(f: &mut Frame, area: Rect, state: &FormState, field: FormField, value: &str) {
    let focused = state.focus == field;
    let style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };

    let text = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };

    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(field.label()));
    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &FormState) {
    if let SubmissionState::Submitting(throbber_state) = &state.submission {
        let label = state
            .message
            .as_ref()
            .map(|message| message.text.clone())
            .unwrap_or_default();
        let throbber = throbber_widgets_tui::Throbber::default()
            .label(label)
            .style(theme::status_style(crate::state::Tone::Info))
            .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
        f.render_stateful_widget(throbber, area, &mut throbber_state.clone());
        return;
    }

    if let Some(message) = &state.message {
        let status = Paragraph::new(Span::styled(
            message.text.as_str(),
            theme::status_style(message.tone),
        ))
        .alignment(Alignment::Center);
        f.render_widget(status, area);
    }
}
