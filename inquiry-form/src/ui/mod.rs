pub mod form_popup;
pub mod landing;
pub mod layouts;
pub mod theme;

use crate::state::FormState;
use ratatui::Frame;

/// Pure render dispatcher; never mutates state
pub fn render_app(f: &mut Frame, state: &FormState) {
    landing::render(f, state);

    if state.prompt_visible {
        form_popup::render(f, state);
    }
}
