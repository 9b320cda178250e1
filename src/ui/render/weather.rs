use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the weather card.
///
pub fn weather(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let card = state.weather_card();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Weather", styling::active_block_title_style()))
        .border_style(styling::normal_block_border_style(theme));

    let text = if card.loading {
        vec![
            Line::from(""),
            Line::from(vec![
                spinner::span(state, styling::link_style(theme)),
                Span::styled(" Locating...", styling::muted_text_style(theme)),
            ]),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                card.temperature.to_owned(),
                styling::banner_style(theme),
            )),
            Line::from(Span::styled(
                card.condition.to_owned(),
                styling::normal_text_style(theme),
            )),
            Line::from(Span::styled(
                card.location.to_owned(),
                styling::muted_text_style(theme),
            )),
        ]
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, size);
}
