//! Order log, newest first.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let items: Vec<ListItem> = app
        .order_log
        .iter()
        .map(|entry| {
            let time = entry
                .timestamp
                .map(|t| t.format("%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "--".to_string());
            let style = match entry.level {
                StatusLevel::Info => theme::text(),
                StatusLevel::Warning => theme::warning(),
                StatusLevel::Error => theme::negative(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{time} "), theme::direction(entry.direction)),
                Span::styled(entry.message.as_str(), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" Orders ({}) ", app.host().orders().len()))
        .title_style(theme::panel_title(true));

    f.render_widget(List::new(items).block(block), area);
}
