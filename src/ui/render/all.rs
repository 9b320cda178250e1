use super::{alert::alert, auth::auth, dashboard::dashboard, footer::footer, log::log};
use super::Frame;
use crate::state::{State, ViewState};
use ratatui::layout::{Constraint, Direction, Layout};

const LOG_PANEL_HEIGHT: u16 = 8;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let log_height = if state.is_log_visible() {
        LOG_PANEL_HEIGHT
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .split(frame.size());

    match state.current_view() {
        ViewState::Login | ViewState::Register => auth(frame, rows[0], state),
        ViewState::Dashboard => dashboard(frame, rows[0], state),
    }
    if state.is_log_visible() {
        log(frame, rows[1], state);
    }
    footer(frame, rows[2], state);

    let size = frame.size();
    if let Some(message) = state.current_alert() {
        alert(frame, size, message, state);
    }
}
