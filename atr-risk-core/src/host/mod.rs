//! Host platform collaborators.
//!
//! The trading platform owns indicators, quotes, account data, volume
//! normalization and order routing. The bot only sees these traits, so the
//! same adapter runs against a live platform binding or the [`PaperHost`].

pub mod paper;

pub use paper::{PaperHost, PaperSettings, SubmittedOrder};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Direction, Timeframe};
use crate::indicators::AtrSettings;

/// Failures reported by the host. The bot never retries these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("ATR({period}) on {timeframe} is not ready yet")]
    IndicatorNotReady { timeframe: Timeframe, period: usize },

    #[error("market data unavailable: {0}")]
    MarketData(String),

    #[error("volume normalization failed: {0}")]
    Normalization(String),

    #[error("order rejected: {0}")]
    OrderRejected(String),
}

/// Quote and contract metadata for the chart's symbol at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSnapshot {
    pub name: String,
    pub pip_size: f64,
    pub pip_value: f64,
    pub lot_size: f64,
    pub bid: f64,
    pub ask: f64,
}

/// Market order as handed to the host. Stop-loss and take-profit are
/// relative distances in pips; the host converts them to prices on fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    pub direction: Direction,
    pub symbol: String,
    pub volume: f64,
    pub label: String,
    pub stop_loss_pips: f64,
    pub take_profit_pips: f64,
}

/// Host acknowledgement of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: u64,
    pub entry_price: f64,
}

/// Latest indicator values.
pub trait IndicatorFeed {
    fn latest_atr(&self, timeframe: Timeframe, settings: &AtrSettings) -> Result<f64, HostError>;
}

/// Account, quote and contract data.
pub trait MarketData {
    fn balance(&self) -> f64;

    fn symbol(&self) -> Result<SymbolSnapshot, HostError>;

    /// The broker's rounding/min/max/step policy for order volume.
    fn normalize_volume(&self, raw: f64) -> Result<f64, HostError>;
}

/// Order execution. Acceptance here does not mean the order filled.
pub trait OrderSink {
    fn execute_market_order(&mut self, request: &MarketOrderRequest) -> Result<OrderAck, HostError>;
}

/// Everything the bot needs from its host.
pub trait Host: IndicatorFeed + MarketData + OrderSink {}

impl<T: IndicatorFeed + MarketData + OrderSink> Host for T {}
