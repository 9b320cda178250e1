use super::{news::news, weather::weather, Frame};
use crate::state::{DashboardFocus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the dashboard: greeting and search on top, news and weather below.
///
pub fn dashboard(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(size);
    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    greeting(frame, header[0], state);
    search(frame, header[1], state);
    news(frame, body[0], state);
    weather(frame, body[1], state);
}

fn greeting(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        state.welcome_label().to_owned(),
        styling::banner_style(theme),
    )))
    .block(block);
    frame.render_widget(paragraph, size);
}

fn search(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let focused = state.dashboard_focus() == DashboardFocus::Search;
    let border_style = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let line = if focused {
        Line::from(Span::styled(
            format!("{}▏", state.search_input()),
            styling::normal_text_style(theme),
        ))
    } else if state.search_input().is_empty() {
        Line::from(Span::styled(
            "Press / to search market news",
            styling::muted_text_style(theme),
        ))
    } else {
        Line::from(Span::styled(
            state.search_input().to_owned(),
            styling::normal_text_style(theme),
        ))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(border_style);
    frame.render_widget(Paragraph::new(line).block(block), size);
}
