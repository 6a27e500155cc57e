//! Paper host: replays an M15 bar stream and records orders in memory.
//!
//! Quotes come from the last visible close (bid) plus a fixed spread (ask).
//! H1 bars are derived from the visible M15 bars, so the two ATR readings
//! always describe the same instant.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{
    HostError, IndicatorFeed, MarketData, MarketOrderRequest, OrderAck, OrderSink, SymbolSnapshot,
};
use crate::data::resample;
use crate::domain::{Bar, Direction, SymbolSpec, Timeframe};
use crate::indicators::{Atr, AtrSettings, Indicator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    /// Account balance in account currency.
    pub balance: f64,
    /// Fixed ask-bid spread in pips.
    pub spread_pips: f64,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            balance: 10_000.0,
            spread_pips: 1.0,
        }
    }
}

/// An order the paper host accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedOrder {
    pub id: u64,
    pub timestamp: NaiveDateTime,
    pub request: MarketOrderRequest,
    pub entry_price: f64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
}

#[derive(Debug, Clone)]
pub struct PaperHost {
    symbol: SymbolSpec,
    settings: PaperSettings,
    bars: Vec<Bar>,
    /// Number of bars visible to the bot.
    visible: usize,
    orders: Vec<SubmittedOrder>,
    next_order_id: u64,
    rejection: Option<String>,
}

impl PaperHost {
    /// All bars start visible; use [`PaperHost::seek`] to replay from earlier.
    pub fn new(symbol: SymbolSpec, settings: PaperSettings, bars: Vec<Bar>) -> Self {
        let visible = bars.len();
        Self {
            symbol,
            settings,
            bars,
            visible,
            orders: Vec::new(),
            next_order_id: 1,
            rejection: None,
        }
    }

    pub fn symbol_spec(&self) -> &SymbolSpec {
        &self.symbol
    }

    pub fn settings(&self) -> &PaperSettings {
        &self.settings
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.settings.balance = balance;
    }

    pub fn visible_bars(&self) -> &[Bar] {
        &self.bars[..self.visible]
    }

    pub fn current_bar(&self) -> Option<&Bar> {
        self.visible_bars().last()
    }

    pub fn total_bars(&self) -> usize {
        self.bars.len()
    }

    /// Show only the first `visible` bars (clamped to the series length).
    pub fn seek(&mut self, visible: usize) {
        self.visible = visible.min(self.bars.len());
    }

    /// Reveal the next bar. Returns false once the series is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.visible < self.bars.len() {
            self.visible += 1;
            true
        } else {
            false
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.visible == self.bars.len()
    }

    pub fn orders(&self) -> &[SubmittedOrder] {
        &self.orders
    }

    /// Make every following submission fail with `reason`.
    pub fn reject_orders(&mut self, reason: impl Into<String>) {
        self.rejection = Some(reason.into());
    }

    pub fn accept_orders(&mut self) {
        self.rejection = None;
    }

    fn quote(&self) -> Option<(f64, f64)> {
        let bid = self.current_bar()?.close;
        Some((bid, bid + self.settings.spread_pips * self.symbol.pip_size))
    }

    fn bars_for(&self, timeframe: Timeframe) -> Vec<Bar> {
        match timeframe {
            Timeframe::M15 => self.visible_bars().to_vec(),
            Timeframe::H1 => resample(self.visible_bars(), Timeframe::H1),
        }
    }
}

impl IndicatorFeed for PaperHost {
    fn latest_atr(&self, timeframe: Timeframe, settings: &AtrSettings) -> Result<f64, HostError> {
        if settings.period == 0 {
            return Err(HostError::MarketData(format!(
                "ATR period must be at least 1 on {timeframe}"
            )));
        }
        let bars = self.bars_for(timeframe);
        Atr::from_settings(settings)
            .latest(&bars)
            .ok_or(HostError::IndicatorNotReady {
                timeframe,
                period: settings.period,
            })
    }
}

impl MarketData for PaperHost {
    fn balance(&self) -> f64 {
        self.settings.balance
    }

    fn symbol(&self) -> Result<SymbolSnapshot, HostError> {
        let (bid, ask) = self
            .quote()
            .ok_or_else(|| HostError::MarketData(format!("no quote for {}", self.symbol.name)))?;
        Ok(SymbolSnapshot {
            name: self.symbol.name.clone(),
            pip_size: self.symbol.pip_size,
            pip_value: self.symbol.pip_value,
            lot_size: self.symbol.lot_size,
            bid,
            ask,
        })
    }

    fn normalize_volume(&self, raw: f64) -> Result<f64, HostError> {
        Ok(self.symbol.normalize_volume(raw))
    }
}

impl OrderSink for PaperHost {
    fn execute_market_order(&mut self, request: &MarketOrderRequest) -> Result<OrderAck, HostError> {
        if let Some(reason) = &self.rejection {
            return Err(HostError::OrderRejected(reason.clone()));
        }
        if request.symbol != self.symbol.name {
            return Err(HostError::OrderRejected(format!(
                "unknown symbol {} (chart is {})",
                request.symbol, self.symbol.name
            )));
        }
        if !(request.volume > 0.0) || request.volume > self.symbol.volume_max {
            return Err(HostError::OrderRejected(format!(
                "volume {} outside (0, {}]",
                request.volume, self.symbol.volume_max
            )));
        }
        let (bid, ask) = self
            .quote()
            .ok_or_else(|| HostError::OrderRejected("market closed: no quote".into()))?;
        let timestamp = self
            .current_bar()
            .map(|b| b.timestamp)
            .ok_or_else(|| HostError::OrderRejected("market closed: no bar".into()))?;

        let pip = self.symbol.pip_size;
        let (entry_price, stop_loss_price, take_profit_price) = match request.direction {
            Direction::Buy => (
                ask,
                ask - request.stop_loss_pips * pip,
                ask + request.take_profit_pips * pip,
            ),
            Direction::Sell => (
                bid,
                bid + request.stop_loss_pips * pip,
                bid - request.take_profit_pips * pip,
            ),
        };

        let id = self.next_order_id;
        self.next_order_id += 1;
        self.orders.push(SubmittedOrder {
            id,
            timestamp,
            request: request.clone(),
            entry_price,
            stop_loss_price,
            take_profit_price,
        });

        Ok(OrderAck {
            order_id: id,
            entry_price,
        })
    }
}
