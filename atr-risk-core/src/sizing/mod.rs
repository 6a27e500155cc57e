//! Risk order sizer: ATR stop distance → volume, stop-loss and take-profit.
//!
//! The sizer is a pure function of its inputs. Volume normalization is the
//! host's broker-specific policy and is passed in as a closure.

pub mod config;
pub mod error;
pub mod plan;
pub mod rounding;

pub use config::RiskConfig;
pub use error::{Result, SizingError};
pub use plan::OrderPlan;
pub use rounding::round_to;

use crate::domain::{AccountState, Direction, MarketReading};
use crate::host::HostError;

/// Take-profit distance as a multiple of the stop-loss distance.
pub const TAKE_PROFIT_RATIO: f64 = 2.0;

/// Pip distances are quoted to one decimal.
pub const PIP_DECIMALS: u32 = 1;

/// Size a market order from the current ATR reading.
///
/// # Formula
/// ```text
/// stop_loss_pips   = round(atr_m15 / pip_size * scale_factor, 1)
/// risk_amount      = balance * risk_percent / 100
/// volume_raw       = risk_amount / (stop_loss_pips * pip_value)
/// volume           = normalize_volume(volume_raw)
/// take_profit_pips = round(stop_loss_pips * 2, 1)
/// ```
/// Buy orders measure both levels from the bid, sell orders from the ask.
///
/// # Example
/// - ATR(M15): 0.0012, pip size 0.0001, scale 2.0 → stop-loss 24.0 pips
/// - Balance 10,000, risk 1% → risk amount 100
/// - Pip value 10 → raw volume 100 / (24 × 10) ≈ 0.4167
/// - Take-profit 48.0 pips
///
/// # Errors
/// - [`SizingError::InvalidInput`] for a non-positive or non-finite reading or
///   config value, or an ask below the bid.
/// - [`SizingError::DivisionByZero`] when the stop-loss rounds to 0 pips. The
///   normalizer is not called in that case.
/// - [`SizingError::HostRejection`] when the normalizer fails.
///
/// A zero or negative balance is not an error: the raw volume becomes 0 and
/// is handed to the normalizer as such.
pub fn compute_order_plan<N>(
    direction: Direction,
    reading: &MarketReading,
    account: &AccountState,
    config: &RiskConfig,
    normalize_volume: N,
) -> Result<OrderPlan>
where
    N: FnOnce(f64) -> std::result::Result<f64, HostError>,
{
    validate_reading(reading)?;
    config.validate()?;
    if !account.balance.is_finite() {
        return Err(SizingError::InvalidInput {
            field: "balance",
            value: account.balance,
        });
    }

    let pip_size = reading.pip_size;
    let stop_loss_pips = round_to(reading.atr_m15 / pip_size * config.scale_factor, PIP_DECIMALS);
    if stop_loss_pips == 0.0 {
        return Err(SizingError::DivisionByZero {
            atr_m15: reading.atr_m15,
            pip_size,
            scale_factor: config.scale_factor,
        });
    }

    let risk_amount = account.balance * config.risk_fraction();
    let volume_raw = (risk_amount / (stop_loss_pips * reading.pip_value)).max(0.0);

    let volume = normalize_volume(volume_raw)?;
    if !volume.is_finite() || volume < 0.0 {
        return Err(HostError::Normalization(format!(
            "normalizer returned {volume} for raw volume {volume_raw}"
        ))
        .into());
    }

    let take_profit_pips = round_to(stop_loss_pips * TAKE_PROFIT_RATIO, PIP_DECIMALS);

    let (stop_loss_price, take_profit_price) = match direction {
        Direction::Buy => (
            reading.bid - stop_loss_pips * pip_size,
            reading.bid + take_profit_pips * pip_size,
        ),
        Direction::Sell => (
            reading.ask + stop_loss_pips * pip_size,
            reading.ask - take_profit_pips * pip_size,
        ),
    };

    // A stop distance wider than the price itself cannot be placed.
    if stop_loss_price <= 0.0 {
        return Err(SizingError::InvalidInput {
            field: "stop_loss_price",
            value: stop_loss_price,
        });
    }
    if take_profit_price <= 0.0 {
        return Err(SizingError::InvalidInput {
            field: "take_profit_price",
            value: take_profit_price,
        });
    }

    Ok(OrderPlan {
        direction,
        stop_loss_pips,
        take_profit_pips,
        volume,
        stop_loss_price,
        take_profit_price,
        risk_amount,
        volume_raw,
    })
}

fn validate_reading(reading: &MarketReading) -> Result<()> {
    let fields = [
        ("atr_m15", reading.atr_m15),
        ("pip_size", reading.pip_size),
        ("pip_value", reading.pip_value),
        ("bid", reading.bid),
        ("ask", reading.ask),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(SizingError::InvalidInput { field, value });
        }
    }
    if reading.ask < reading.bid {
        return Err(SizingError::InvalidInput {
            field: "ask",
            value: reading.ask,
        });
    }
    Ok(())
}

/// ATR risk sizer bound to a session's [`RiskConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtrRiskSizer {
    config: RiskConfig,
}

impl AtrRiskSizer {
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn plan<N>(
        &self,
        direction: Direction,
        reading: &MarketReading,
        account: &AccountState,
        normalize_volume: N,
    ) -> Result<OrderPlan>
    where
        N: FnOnce(f64) -> std::result::Result<f64, HostError>,
    {
        compute_order_plan(direction, reading, account, &self.config, normalize_volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const EPS: f64 = 1e-9;

    fn reading() -> MarketReading {
        MarketReading {
            atr_m15: 0.0012,
            atr_h1: Some(0.0030),
            pip_size: 0.0001,
            pip_value: 10.0,
            bid: 1.1000,
            ask: 1.1002,
        }
    }

    fn identity(v: f64) -> std::result::Result<f64, HostError> {
        Ok(v)
    }

    #[test]
    fn reference_example() {
        let plan = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            identity,
        )
        .unwrap();

        assert_eq!(plan.stop_loss_pips, 24.0);
        assert_eq!(plan.take_profit_pips, 48.0);
        assert!((plan.risk_amount - 100.0).abs() < EPS);
        assert!((plan.volume_raw - 100.0 / 240.0).abs() < EPS);
        assert!((plan.volume - 0.416_666_666_7).abs() < 1e-6);
    }

    #[test]
    fn buy_levels_measured_from_bid() {
        let plan = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            identity,
        )
        .unwrap();
        assert!((plan.stop_loss_price - (1.1000 - 0.0024)).abs() < EPS);
        assert!((plan.take_profit_price - (1.1000 + 0.0048)).abs() < EPS);
    }

    #[test]
    fn sell_levels_measured_from_ask() {
        let plan = compute_order_plan(
            Direction::Sell,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            identity,
        )
        .unwrap();
        assert!((plan.stop_loss_price - (1.1002 + 0.0024)).abs() < EPS);
        assert!((plan.take_profit_price - (1.1002 - 0.0048)).abs() < EPS);
    }

    #[test]
    fn normalizer_output_becomes_volume() {
        let plan = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            |_| Ok(1_000.0),
        )
        .unwrap();
        assert_eq!(plan.volume, 1_000.0);
        assert!((plan.volume_raw - 100.0 / 240.0).abs() < EPS);
    }

    #[test]
    fn zero_stop_loss_never_reaches_normalizer() {
        let called = Cell::new(false);
        let mut tiny = reading();
        tiny.atr_m15 = 0.000_000_1; // 0.001 pips * 2 → rounds to 0.0
        let err = compute_order_plan(
            Direction::Buy,
            &tiny,
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            |v| {
                called.set(true);
                Ok(v)
            },
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::DivisionByZero { .. }));
        assert!(!called.get());
    }

    #[test]
    fn non_positive_inputs_are_invalid() {
        let cases: [(&str, fn(&mut MarketReading)); 4] = [
            ("atr_m15", |r| r.atr_m15 = 0.0),
            ("bid", |r| r.bid = -0.001),
            ("pip_size", |r| r.pip_size = 0.0),
            ("pip_value", |r| r.pip_value = f64::NAN),
        ];
        for (field, mutate) in cases {
            let mut r = reading();
            mutate(&mut r);
            let err = compute_order_plan(
                Direction::Sell,
                &r,
                &AccountState::new(10_000.0),
                &RiskConfig::default(),
                identity,
            )
            .unwrap_err();
            match err {
                SizingError::InvalidInput { field: got, .. } => assert_eq!(got, field),
                other => panic!("expected InvalidInput for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn h1_reading_never_gates_the_plan() {
        let expected = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            identity,
        )
        .unwrap();
        for atr_h1 in [None, Some(0.0), Some(f64::NAN)] {
            let r = MarketReading { atr_h1, ..reading() };
            let plan = compute_order_plan(
                Direction::Buy,
                &r,
                &AccountState::new(10_000.0),
                &RiskConfig::default(),
                identity,
            )
            .unwrap();
            assert_eq!(plan, expected);
        }
    }

    #[test]
    fn crossed_quote_is_invalid() {
        let mut r = reading();
        r.ask = r.bid - 0.0001;
        let err = compute_order_plan(
            Direction::Buy,
            &r,
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            identity,
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::InvalidInput { field: "ask", .. }));
    }

    #[test]
    fn bad_config_is_invalid() {
        let config = RiskConfig {
            scale_factor: 2.0,
            risk_percent: 150.0,
        };
        let err = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &config,
            identity,
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::InvalidInput { field: "risk_percent", .. }));
    }

    #[test]
    fn empty_account_gives_zero_raw_volume() {
        for balance in [0.0, -500.0] {
            let plan = compute_order_plan(
                Direction::Buy,
                &reading(),
                &AccountState::new(balance),
                &RiskConfig::default(),
                identity,
            )
            .unwrap();
            assert_eq!(plan.volume_raw, 0.0);
            assert_eq!(plan.volume, 0.0);
            assert!(!plan.is_tradeable());
        }
    }

    #[test]
    fn normalizer_failure_is_host_rejection() {
        let err = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            |_| Err(HostError::Normalization("symbol halted".into())),
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::HostRejection(HostError::Normalization(_))));
    }

    #[test]
    fn nonsense_normalizer_output_is_host_rejection() {
        let err = compute_order_plan(
            Direction::Buy,
            &reading(),
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            |_| Ok(-1.0),
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::HostRejection(_)));
    }

    #[test]
    fn stop_beyond_zero_price_is_invalid() {
        let mut r = reading();
        r.atr_m15 = 1.0; // 10,000 pips * 2 below a 1.1 bid
        let err = compute_order_plan(
            Direction::Buy,
            &r,
            &AccountState::new(10_000.0),
            &RiskConfig::default(),
            identity,
        )
        .unwrap_err();
        assert!(matches!(err, SizingError::InvalidInput { field: "stop_loss_price", .. }));
    }

    #[test]
    fn sizer_binds_config() {
        let sizer = AtrRiskSizer::new(RiskConfig::new(3.0, 2.0).unwrap()).unwrap();
        let plan = sizer
            .plan(Direction::Buy, &reading(), &AccountState::new(10_000.0), identity)
            .unwrap();
        assert_eq!(plan.stop_loss_pips, 36.0);
        assert_eq!(plan.take_profit_pips, 72.0);
        assert!((plan.risk_amount - 200.0).abs() < EPS);
        assert!((plan.reward_to_risk() - 2.0).abs() < EPS);
    }
}
