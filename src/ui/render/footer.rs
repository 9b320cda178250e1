use super::Frame;
use crate::state::{DashboardFocus, State, ViewState};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the current state.
///
pub fn controls_text(state: &State) -> &'static str {
    if state.current_alert().is_some() {
        return " Enter/Esc: dismiss";
    }
    match state.current_view() {
        ViewState::Login => {
            " Tab: switch field | Enter: log in | Ctrl+R: register | F2: log | Esc: quit"
        }
        ViewState::Register => {
            " Tab: switch field | Enter: register | Esc: back to login | F2: log"
        }
        ViewState::Dashboard => match state.dashboard_focus() {
            DashboardFocus::Search => " Type to search | Enter: search | Esc: back to news",
            DashboardFocus::News => {
                " ↑↓/jk: select | Enter/o: open | /: search | l: log out | F2: log | q: quit"
            }
        },
    }
}

/// Render footer with key hints.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let paragraph = Paragraph::new(Line::from(Span::styled(
        controls_text(state),
        styling::muted_text_style(theme),
    )));
    frame.render_widget(paragraph, size);
}
