use super::{centered_rect, Frame};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the blocking alert on top of everything else.
///
pub fn alert(frame: &mut Frame, size: Rect, message: &str, state: &State) {
    let theme = state.get_theme();
    let area = centered_rect(50, 7, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Alert ", styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme));
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_owned(),
            styling::headline_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: OK",
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
