//! Close-price line chart for the visible bars.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Bars shown in the chart window.
const WINDOW: usize = 96;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let bars = app.host().visible_bars();
    let window = &bars[bars.len().saturating_sub(WINDOW)..];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" M15 close ")
        .title_style(theme::panel_title(false));

    if window.len() < 2 {
        let para = Paragraph::new("waiting for bars (press n or p)")
            .style(theme::muted())
            .block(block);
        f.render_widget(para, area);
        return;
    }

    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, bar)| (i as f64, bar.close))
        .collect();
    let (lo, hi) = price_bounds(window.iter().map(|b| b.close));

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, (window.len() - 1) as f64]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([lo, hi])
                .labels(vec![
                    Span::styled(format!("{lo:.5}"), theme::muted()),
                    Span::styled(format!("{hi:.5}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Min/max with 5% padding; a flat series still gets a non-empty range.
fn price_bounds(prices: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    let pad = ((max - min) * 0.05).max(max.abs() * 1e-6);
    (min - pad, max + pad)
}
