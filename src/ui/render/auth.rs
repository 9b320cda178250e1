use super::{centered_rect, Frame};
use crate::state::{AuthForm, FormField, State, ViewState};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub const BANNER: &str = "
  __  __               _        _     ___      _
 |  \\/  | __ _  _ _  | |__ ___| |_  | _ \\_  _| | ___ ___
 | |\\/| |/ _` || '_| | / // -_)  _| |  _/ || | |(_-</ -_)
 |_|  |_|\\__,_||_|   |_\\_\\\\___|\\__| |_|  \\_,_|_|/__/\\___|
";

const FORM_HEIGHT: u16 = 18;

/// Render the login or registration form, whichever view is active.
///
pub fn auth(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (title, form) = match state.current_view() {
        ViewState::Register => (" Register ", state.register_form()),
        _ => (" Login ", state.login_form()),
    };

    let area = centered_rect(70, FORM_HEIGHT, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Banner
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error or progress
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let banner = Text::styled(BANNER, styling::banner_style(theme));
    frame.render_widget(
        Paragraph::new(banner).alignment(Alignment::Center),
        rows[0],
    );

    frame.render_widget(
        field("Username", form.username().to_owned(), form, FormField::Username, state),
        rows[1],
    );
    frame.render_widget(
        field(
            "Password",
            "*".repeat(form.password().chars().count()),
            form,
            FormField::Password,
            state,
        ),
        rows[2],
    );

    let status = if form.is_pending() {
        let label = match state.current_view() {
            ViewState::Register => " Creating account...",
            _ => " Signing in...",
        };
        Line::from(vec![
            spinner::span(state, Style::default().fg(theme.accent.to_color())),
            Span::styled(label, styling::muted_text_style(theme)),
        ])
    } else {
        Line::from(Span::styled(
            form.error().to_owned(),
            styling::error_text_style(theme),
        ))
    };
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        rows[3],
    );
}

fn field<'a>(
    label: &'a str,
    value: String,
    form: &AuthForm,
    which: FormField,
    state: &State,
) -> Paragraph<'a> {
    let theme = state.get_theme();
    let focused = form.field() == which;
    let border_style = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let content = if focused {
        format!("{}▏", value)
    } else {
        value
    };
    Paragraph::new(Span::styled(content, styling::normal_text_style(theme))).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border_style),
    )
}
