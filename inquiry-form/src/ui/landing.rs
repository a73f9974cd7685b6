use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::FormState;
use crate::ui::{layouts, theme};

const TITLE: &str = "Admission Inquiry";

pub fn render(f: &mut Frame, state: &FormState) {
    let [title_area, content_area, help_area] = layouts::screen_layout(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(TITLE, theme::title_style())),
        title_area,
    );

    let mut lines = vec![match &state.destination {
        Some(destination) => Line::from(format!("Continue to {}", destination)),
        None => Line::from("Leave your name and phone number and we will call you back."),
    }];
    if state.already_submitted {
        lines.push(Line::from(""));
        lines.push(Line::from("You have already sent an inquiry. Thank you!"));
    }
    if let Some(message) = state.message.as_ref().filter(|_| !state.prompt_visible) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.text.as_str(),
            theme::status_style(message.tone),
        )));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, content_area);

    let help = Paragraph::new("Enter: continue  |  q/Esc: quit")
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, help_area);
}
