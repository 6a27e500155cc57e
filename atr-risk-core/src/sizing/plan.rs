use serde::{Deserialize, Serialize};

use crate::domain::Direction;

/// Fully sized market order, ready for the host to submit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderPlan {
    pub direction: Direction,
    /// Rounded to one decimal.
    pub stop_loss_pips: f64,
    /// Always `round(stop_loss_pips * 2, 1)`.
    pub take_profit_pips: f64,
    /// Volume after host normalization.
    pub volume: f64,
    pub stop_loss_price: f64,
    pub take_profit_price: f64,
    /// Account currency put at risk.
    pub risk_amount: f64,
    /// Volume before normalization.
    pub volume_raw: f64,
}

impl OrderPlan {
    /// Reward-to-risk ratio implied by the rounded pip distances.
    pub fn reward_to_risk(&self) -> f64 {
        self.take_profit_pips / self.stop_loss_pips
    }

    pub fn is_tradeable(&self) -> bool {
        self.volume > 0.0
    }
}
