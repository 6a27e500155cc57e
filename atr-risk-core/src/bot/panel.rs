//! The two chart buttons and their ATR labels.

use serde::{Deserialize, Serialize};

use crate::domain::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonColor {
    Green,
    Red,
}

/// ATR readings in pips for the label text. `None` while warming up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtrPips {
    pub m15: Option<f64>,
    pub h1: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub direction: Direction,
    pub text: String,
    pub color: ButtonColor,
}

impl Button {
    fn new(direction: Direction, atr: &AtrPips) -> Self {
        let color = match direction {
            Direction::Buy => ButtonColor::Green,
            Direction::Sell => ButtonColor::Red,
        };
        Self {
            direction,
            text: button_text(direction, atr),
            color,
        }
    }
}

/// `"Buy (ATR M15: 12.3 pips, H1: 30.1 pips)"`.
pub fn button_text(direction: Direction, atr: &AtrPips) -> String {
    format!(
        "{} (ATR M15: {}, H1: {})",
        direction.label(),
        fmt_pips(atr.m15),
        fmt_pips(atr.h1)
    )
}

fn fmt_pips(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1} pips"),
        None => "warming up".to_string(),
    }
}

/// Horizontal strip holding the Buy and Sell buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    buy: Button,
    sell: Button,
}

impl ControlPanel {
    pub fn new(atr: &AtrPips) -> Self {
        Self {
            buy: Button::new(Direction::Buy, atr),
            sell: Button::new(Direction::Sell, atr),
        }
    }

    pub fn refresh(&mut self, atr: &AtrPips) {
        self.buy.text = button_text(Direction::Buy, atr);
        self.sell.text = button_text(Direction::Sell, atr);
    }

    pub fn button(&self, direction: Direction) -> &Button {
        match direction {
            Direction::Buy => &self.buy,
            Direction::Sell => &self.sell,
        }
    }

    /// Buttons in display order, left to right.
    pub fn buttons(&self) -> [&Button; 2] {
        [&self.buy, &self.sell]
    }
}
