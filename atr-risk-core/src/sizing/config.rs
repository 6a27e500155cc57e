use serde::{Deserialize, Serialize};

use super::error::{Result, SizingError};

/// Session-wide risk parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Stop-loss distance as a multiple of the M15 ATR.
    pub scale_factor: f64,
    /// Percentage of the account balance risked per trade, in (0, 100].
    pub risk_percent: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            risk_percent: 1.0,
        }
    }
}

impl RiskConfig {
    pub fn new(scale_factor: f64, risk_percent: f64) -> Result<Self> {
        let config = Self { scale_factor, risk_percent };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(SizingError::InvalidInput {
                field: "scale_factor",
                value: self.scale_factor,
            });
        }
        if !self.risk_percent.is_finite() || self.risk_percent <= 0.0 || self.risk_percent > 100.0 {
            return Err(SizingError::InvalidInput {
                field: "risk_percent",
                value: self.risk_percent,
            });
        }
        Ok(())
    }

    /// Fraction of the balance put at risk (1.0% → 0.01).
    pub fn risk_fraction(&self) -> f64 {
        self.risk_percent / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bot_parameters() {
        let config = RiskConfig::default();
        assert_eq!(config.scale_factor, 2.0);
        assert_eq!(config.risk_percent, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(RiskConfig::new(0.0, 1.0).is_err());
        assert!(RiskConfig::new(-1.0, 1.0).is_err());
        assert!(RiskConfig::new(2.0, 0.0).is_err());
        assert!(RiskConfig::new(2.0, 100.5).is_err());
        assert!(RiskConfig::new(2.0, f64::NAN).is_err());
        assert!(RiskConfig::new(2.0, 100.0).is_ok());
    }

    #[test]
    fn risk_fraction() {
        assert_eq!(RiskConfig::new(2.0, 2.5).unwrap().risk_fraction(), 0.025);
    }
}
