//! ATR Risk Core: risk-based order sizing for a two-button chart bot.
//!
//! This crate contains:
//! - The pure risk order sizer (ATR stop distance → volume, stop-loss, take-profit)
//! - Host collaborator traits (indicator feed, market data, order sink)
//! - The bot lifecycle adapter that wires a click to the sizer and the host
//! - A paper host that replays M15 bars, for the CLI, the TUI and tests
//! - ATR indicator, bar loading, resampling, and synthetic data
//! - TOML bot configuration

pub mod bot;
pub mod config;
pub mod data;
pub mod domain;
pub mod host;
pub mod indicators;
pub mod sizing;

pub use bot::{AtrRiskBot, BotError, ClickOutcome, ControlPanel};
pub use config::{BotConfig, ConfigError};
pub use domain::{AccountState, Direction, MarketReading, SymbolSpec, Timeframe};
pub use host::{Host, HostError, PaperHost};
pub use sizing::{compute_order_plan, AtrRiskSizer, OrderPlan, RiskConfig, SizingError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public types are Send + Sync, so a front end can
    /// move the bot onto a worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<OrderPlan>();
        require_sync::<OrderPlan>();
        require_send::<BotConfig>();
        require_sync::<BotConfig>();
        require_send::<PaperHost>();
        require_sync::<PaperHost>();
        require_send::<SizingError>();
        require_sync::<SizingError>();
        require_send::<AtrRiskBot<PaperHost>>();
    }
}
