//! Color tokens and shared styles for the bot screen.

use ratatui::style::{Color, Modifier, Style};

use atr_risk_core::bot::ButtonColor;
use atr_risk_core::Direction;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const BUY: Color = Color::Rgb(0, 200, 83);
pub const SELL: Color = Color::Rgb(229, 57, 53);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

/// Fill color for a chart button.
pub fn button_color(color: ButtonColor) -> Color {
    match color {
        ButtonColor::Green => BUY,
        ButtonColor::Red => SELL,
    }
}

pub fn button(color: ButtonColor, selected: bool) -> Style {
    let style = Style::default().fg(TEXT).bg(button_color(color));
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn button_border(color: ButtonColor, selected: bool) -> Style {
    if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(button_color(color))
    }
}

pub fn direction(direction: Direction) -> Style {
    match direction {
        Direction::Buy => Style::default().fg(BUY),
        Direction::Sell => Style::default().fg(SELL),
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    panel_border(active).add_modifier(Modifier::BOLD)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}
