//! The Buy and Sell buttons.

use ratatui::layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use atr_risk_core::bot::Button;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(panel) = app.panel() else {
        f.render_widget(
            Paragraph::new("bot stopped").style(theme::muted()),
            area,
        );
        return;
    };

    let cells = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (button, cell) in panel.buttons().into_iter().zip(cells.iter()) {
        render_button(f, *cell, button, button.direction == app.selected);
    }
}

fn render_button(f: &mut Frame, area: Rect, button: &Button, selected: bool) {
    let border = if selected {
        BorderType::Thick
    } else {
        BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border)
        .border_style(theme::button_border(button.color, selected));

    let para = Paragraph::new(button.text.as_str())
        .alignment(Alignment::Center)
        .style(theme::button(button.color, selected))
        .block(block);
    f.render_widget(para, area);
}
