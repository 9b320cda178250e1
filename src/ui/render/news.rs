use super::Frame;
use crate::state::{DashboardFocus, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the news list, its placeholder, or nothing while empty.
///
pub fn news(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let focused = state.dashboard_focus() == DashboardFocus::News;

    let mut title = vec![Span::styled(
        "Market News ",
        styling::active_block_title_style(),
    )];
    if state.news_panel().loading {
        title.push(spinner::span(state, styling::link_style(&theme)));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(if focused {
            styling::active_block_border_style(&theme)
        } else {
            styling::normal_block_border_style(&theme)
        });

    if let Some(placeholder) = &state.news_panel().placeholder {
        let paragraph = Paragraph::new(Span::styled(
            placeholder.to_owned(),
            styling::muted_text_style(&theme),
        ))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, size);
        return;
    }

    let items: Vec<ListItem> = state
        .news_panel()
        .entries
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    entry.title.to_owned(),
                    styling::headline_style(&theme),
                )),
                Line::from(Span::styled(
                    entry.source_line.to_owned(),
                    styling::muted_text_style(&theme),
                )),
                Line::from(vec![
                    Span::styled(entry.link.label.to_owned(), styling::link_style(&theme)),
                    Span::styled(
                        format!(" {}", entry.link.href),
                        styling::muted_text_style(&theme),
                    ),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::selected_list_item_style(&theme));
    frame.render_stateful_widget(list, size, state.news_list_state());
}
