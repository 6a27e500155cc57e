//! Immutable snapshots the sizer consumes.

use serde::{Deserialize, Serialize};

/// Indicator and quote readings taken at decision time.
///
/// ATR values are in price units, not pips. The H1 reading is informational
/// and `None` while the host's H1 indicator is still warming up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketReading {
    pub atr_m15: f64,
    pub atr_h1: Option<f64>,
    pub pip_size: f64,
    pub pip_value: f64,
    pub bid: f64,
    pub ask: f64,
}

impl MarketReading {
    pub fn atr_m15_pips(&self) -> f64 {
        self.atr_m15 / self.pip_size
    }

    pub fn atr_h1_pips(&self) -> Option<f64> {
        self.atr_h1.map(|atr| atr / self.pip_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub balance: f64,
}

impl AccountState {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }
}
