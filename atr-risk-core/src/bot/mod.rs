//! Bot lifecycle adapter.
//!
//! Binds the pure sizer to a [`Host`]: builds the button panel on start,
//! refreshes the ATR labels on every tick, and turns a click into a sized
//! market order.

pub mod panel;

pub use panel::{button_text, AtrPips, Button, ButtonColor, ControlPanel};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{BotConfig, ConfigError};
use crate::domain::{AccountState, Direction, MarketReading, Timeframe};
use crate::host::{Host, HostError, MarketOrderRequest, OrderAck, SymbolSnapshot};
use crate::sizing::{round_to, AtrRiskSizer, OrderPlan, SizingError};

#[derive(Debug, Error)]
pub enum BotError {
    #[error("bot has not been started")]
    NotStarted,

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<HostError> for BotError {
    fn from(err: HostError) -> Self {
        BotError::Sizing(SizingError::HostRejection(err))
    }
}

/// What a button click produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The host accepted the order.
    Submitted { plan: OrderPlan, ack: OrderAck },
    /// The plan normalized to zero volume; nothing was sent.
    Skipped { plan: OrderPlan },
}

impl ClickOutcome {
    pub fn plan(&self) -> &OrderPlan {
        match self {
            ClickOutcome::Submitted { plan, .. } | ClickOutcome::Skipped { plan } => plan,
        }
    }
}

pub struct AtrRiskBot<H: Host> {
    host: H,
    config: BotConfig,
    sizer: AtrRiskSizer,
    panel: Option<ControlPanel>,
}

impl<H: Host> AtrRiskBot<H> {
    pub fn new(host: H, config: BotConfig) -> Result<Self, BotError> {
        config.validate()?;
        let sizer = AtrRiskSizer::new(config.risk)?;
        Ok(Self {
            host,
            config,
            sizer,
            panel: None,
        })
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn panel(&self) -> Option<&ControlPanel> {
        self.panel.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.panel.is_some()
    }

    /// Attach the control panel. Calling it again rebuilds the panel.
    pub fn on_start(&mut self) -> &ControlPanel {
        let atr = self.atr_pips();
        info!(
            symbol = %self.config.symbol.name,
            scale_factor = self.config.risk.scale_factor,
            risk_percent = self.config.risk.risk_percent,
            atr_period = self.config.atr.period,
            "bot started"
        );
        self.panel.insert(ControlPanel::new(&atr))
    }

    /// Refresh both button labels from the latest ATR values.
    pub fn on_tick(&mut self) -> Result<(), BotError> {
        let atr = self.atr_pips();
        let panel = self.panel.as_mut().ok_or(BotError::NotStarted)?;
        panel.refresh(&atr);
        Ok(())
    }

    /// Detach the control panel.
    pub fn on_stop(&mut self) -> Option<ControlPanel> {
        let panel = self.panel.take();
        if panel.is_some() {
            info!("bot stopped");
        }
        panel
    }

    /// Size and submit a market order for a button click.
    pub fn on_click(&mut self, direction: Direction) -> Result<ClickOutcome, BotError> {
        if self.panel.is_none() {
            return Err(BotError::NotStarted);
        }

        let (reading, symbol) = self.reading()?;
        let account = AccountState::new(self.host.balance());

        let host = &self.host;
        let plan = self
            .sizer
            .plan(direction, &reading, &account, |raw| host.normalize_volume(raw))
            .inspect_err(|err| warn!(%direction, error = %err, "order sizing failed"))?;

        debug!(
            atr_m15_pips = round_to(reading.atr_m15_pips(), 1),
            atr_h1_pips = ?reading.atr_h1_pips().map(|pips| round_to(pips, 1)),
            stop_loss_pips = plan.stop_loss_pips,
            pip_value = reading.pip_value,
            lot_size = symbol.lot_size,
            risk_amount = plan.risk_amount,
            volume = plan.volume,
            stop_loss_price = plan.stop_loss_price,
            take_profit_price = plan.take_profit_price,
            "order plan"
        );

        if !plan.is_tradeable() {
            warn!(%direction, volume_raw = plan.volume_raw, "volume normalized to zero; order skipped");
            return Ok(ClickOutcome::Skipped { plan });
        }

        let request = MarketOrderRequest {
            direction,
            symbol: symbol.name,
            volume: plan.volume,
            label: self.config.order_label.clone(),
            stop_loss_pips: plan.stop_loss_pips,
            take_profit_pips: plan.take_profit_pips,
        };

        let ack = self
            .host
            .execute_market_order(&request)
            .inspect_err(|err| warn!(%direction, error = %err, "order submission failed"))?;

        info!(
            %direction,
            order_id = ack.order_id,
            symbol = %request.symbol,
            volume = request.volume,
            stop_loss_pips = request.stop_loss_pips,
            take_profit_pips = request.take_profit_pips,
            "market order submitted"
        );

        Ok(ClickOutcome::Submitted { plan, ack })
    }

    /// Snapshot the indicator and quote values the sizer consumes.
    ///
    /// Only the M15 ATR is required; an unavailable H1 ATR is logged and left
    /// out of the reading.
    pub fn reading(&self) -> Result<(MarketReading, SymbolSnapshot), BotError> {
        let atr_m15 = self.host.latest_atr(Timeframe::M15, &self.config.atr)?;
        let atr_h1 = self
            .host
            .latest_atr(Timeframe::H1, &self.config.atr)
            .inspect_err(|err| debug!(error = %err, "H1 ATR unavailable"))
            .ok();
        let symbol = self.host.symbol()?;
        let reading = MarketReading {
            atr_m15,
            atr_h1,
            pip_size: symbol.pip_size,
            pip_value: symbol.pip_value,
            bid: symbol.bid,
            ask: symbol.ask,
        };
        Ok((reading, symbol))
    }

    /// ATR in pips for both timeframes; missing values mean warmup.
    pub fn atr_pips(&self) -> AtrPips {
        let Ok(symbol) = self.host.symbol() else {
            return AtrPips::default();
        };
        let pips = |tf: Timeframe| {
            self.host
                .latest_atr(tf, &self.config.atr)
                .ok()
                .map(|atr| atr / symbol.pip_size)
        };
        AtrPips {
            m15: pips(Timeframe::M15),
            h1: pips(Timeframe::H1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{IndicatorFeed, MarketData, OrderSink};
    use crate::indicators::AtrSettings;

    /// Host with fixed readings that records submitted requests.
    struct StubHost {
        atr_m15: Result<f64, HostError>,
        atr_h1: Result<f64, HostError>,
        balance: f64,
        reject: bool,
        sent: Vec<MarketOrderRequest>,
    }

    impl StubHost {
        fn ready() -> Self {
            Self {
                atr_m15: Ok(0.0012),
                atr_h1: Ok(0.0031),
                balance: 10_000.0,
                reject: false,
                sent: Vec::new(),
            }
        }
    }

    impl IndicatorFeed for StubHost {
        fn latest_atr(&self, timeframe: Timeframe, _: &AtrSettings) -> Result<f64, HostError> {
            match timeframe {
                Timeframe::M15 => self.atr_m15.clone(),
                Timeframe::H1 => self.atr_h1.clone(),
            }
        }
    }

    impl MarketData for StubHost {
        fn balance(&self) -> f64 {
            self.balance
        }

        fn symbol(&self) -> Result<SymbolSnapshot, HostError> {
            Ok(SymbolSnapshot {
                name: "EURUSD".into(),
                pip_size: 0.0001,
                pip_value: 0.0001,
                lot_size: 100_000.0,
                bid: 1.1000,
                ask: 1.1001,
            })
        }

        fn normalize_volume(&self, raw: f64) -> Result<f64, HostError> {
            Ok((raw / 1_000.0).round() * 1_000.0)
        }
    }

    impl OrderSink for StubHost {
        fn execute_market_order(&mut self, request: &MarketOrderRequest) -> Result<OrderAck, HostError> {
            if self.reject {
                return Err(HostError::OrderRejected("not enough money".into()));
            }
            self.sent.push(request.clone());
            Ok(OrderAck {
                order_id: self.sent.len() as u64,
                entry_price: 1.1001,
            })
        }
    }

    fn started(host: StubHost) -> AtrRiskBot<StubHost> {
        let mut bot = AtrRiskBot::new(host, BotConfig::default()).unwrap();
        bot.on_start();
        bot
    }

    #[test]
    fn start_builds_labelled_panel() {
        let mut bot = AtrRiskBot::new(StubHost::ready(), BotConfig::default()).unwrap();
        assert!(!bot.is_running());
        let panel = bot.on_start();
        assert_eq!(
            panel.button(Direction::Buy).text,
            "Buy (ATR M15: 12.0 pips, H1: 31.0 pips)"
        );
        assert!(bot.is_running());
    }

    #[test]
    fn click_submits_sized_order() {
        let mut bot = started(StubHost::ready());
        let outcome = bot.on_click(Direction::Buy).unwrap();

        let ClickOutcome::Submitted { plan, ack } = outcome else {
            panic!("expected a submitted order");
        };
        assert_eq!(ack.order_id, 1);
        assert_eq!(plan.stop_loss_pips, 24.0);
        assert_eq!(plan.take_profit_pips, 48.0);
        // 100 / (24 * 0.0001) = 41,666.7 → 42,000 units
        assert_eq!(plan.volume, 42_000.0);

        let sent = &bot.host().sent[0];
        assert_eq!(sent.direction, Direction::Buy);
        assert_eq!(sent.symbol, "EURUSD");
        assert_eq!(sent.label, "ATR Risk Management");
        assert_eq!(sent.volume, 42_000.0);
        assert_eq!(sent.stop_loss_pips, 24.0);
        assert_eq!(sent.take_profit_pips, 48.0);
    }

    #[test]
    fn click_before_start_is_refused() {
        let mut bot = AtrRiskBot::new(StubHost::ready(), BotConfig::default()).unwrap();
        assert!(matches!(bot.on_click(Direction::Sell), Err(BotError::NotStarted)));
        assert!(matches!(bot.on_tick(), Err(BotError::NotStarted)));
    }

    #[test]
    fn h1_warmup_still_submits() {
        let mut host = StubHost::ready();
        host.atr_h1 = Err(HostError::IndicatorNotReady { timeframe: Timeframe::H1, period: 14 });
        let mut bot = started(host);

        bot.on_tick().unwrap();
        assert_eq!(
            bot.panel().unwrap().button(Direction::Sell).text,
            "Sell (ATR M15: 12.0 pips, H1: warming up)"
        );

        let (reading, _) = bot.reading().unwrap();
        assert_eq!(reading.atr_h1, None);

        let outcome = bot.on_click(Direction::Sell).unwrap();
        assert!(matches!(outcome, ClickOutcome::Submitted { .. }));
        assert_eq!(outcome.plan().stop_loss_pips, 24.0);
        assert_eq!(bot.host().sent.len(), 1);
    }

    #[test]
    fn m15_warmup_blocks_click() {
        let mut host = StubHost::ready();
        host.atr_m15 = Err(HostError::IndicatorNotReady { timeframe: Timeframe::M15, period: 14 });
        let mut bot = started(host);

        let err = bot.on_click(Direction::Buy).unwrap_err();
        assert!(matches!(
            err,
            BotError::Sizing(SizingError::HostRejection(HostError::IndicatorNotReady {
                timeframe: Timeframe::M15,
                ..
            }))
        ));
        assert!(bot.host().sent.is_empty());
    }

    #[test]
    fn zero_balance_skips_submission() {
        let mut host = StubHost::ready();
        host.balance = 0.0;
        let mut bot = started(host);
        let outcome = bot.on_click(Direction::Buy).unwrap();
        assert!(matches!(outcome, ClickOutcome::Skipped { .. }));
        assert_eq!(outcome.plan().volume, 0.0);
        assert!(bot.host().sent.is_empty());
    }

    #[test]
    fn host_rejection_propagates() {
        let mut host = StubHost::ready();
        host.reject = true;
        let mut bot = started(host);
        let err = bot.on_click(Direction::Buy).unwrap_err();
        assert!(matches!(
            err,
            BotError::Sizing(SizingError::HostRejection(HostError::OrderRejected(_)))
        ));
    }

    #[test]
    fn zero_atr_is_invalid_input() {
        let mut host = StubHost::ready();
        host.atr_m15 = Ok(0.0);
        let mut bot = started(host);
        assert!(matches!(
            bot.on_click(Direction::Buy),
            Err(BotError::Sizing(SizingError::InvalidInput { field: "atr_m15", .. }))
        ));
    }

    #[test]
    fn stop_removes_panel() {
        let mut bot = started(StubHost::ready());
        assert!(bot.on_stop().is_some());
        assert!(bot.on_stop().is_none());
        assert!(!bot.is_running());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = BotConfig::default();
        config.risk.risk_percent = 0.0;
        assert!(AtrRiskBot::new(StubHost::ready(), config).is_err());
    }
}
