//! Screen layout: quote header, the two buttons, price chart beside the
//! order log, and a status bar.

pub mod buttons;
pub mod chart;
pub mod order_log;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    buttons::render(f, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    chart::render(f, body[0], app);
    order_log::render(f, body[1], app);

    status_bar::render(f, chunks[3], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let host = app.host();
    let symbol = host.symbol_spec();
    let mut spans = vec![Span::styled(format!(" {} ", symbol.name), theme::accent_bold())];

    match host.current_bar() {
        Some(bar) => {
            let ask = bar.close + host.settings().spread_pips * symbol.pip_size;
            spans.push(Span::styled(
                format!("{}  ", bar.timestamp.format("%Y-%m-%d %H:%M")),
                theme::text(),
            ));
            spans.push(Span::styled(
                format!("bid {:.5}  ask {:.5}  ", bar.close, ask),
                theme::text(),
            ));
        }
        None => spans.push(Span::styled("no quote  ", theme::warning())),
    }

    spans.push(Span::styled(
        format!(
            "balance {:.2}  bar {}/{}",
            host.settings().balance,
            host.visible_bars().len(),
            host.total_bars()
        ),
        theme::muted(),
    ));
    if app.autoplay {
        spans.push(Span::styled("  [autoplay]", theme::warning()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
