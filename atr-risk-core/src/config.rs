//! Bot configuration (TOML).
//!
//! Every section is optional; missing values take the defaults shown below.
//!
//! ```toml
//! order_label = "ATR Risk Management"
//!
//! [risk]
//! scale_factor = 2.0
//! risk_percent = 1.0
//!
//! [atr]
//! period = 14
//! smoothing = "simple"
//!
//! [symbol]
//! name = "EURUSD"
//! pip_size = 0.0001
//! pip_value = 0.0001
//!
//! [paper]
//! balance = 10000.0
//! spread_pips = 1.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::SymbolSpec;
use crate::host::PaperSettings;
use crate::indicators::AtrSettings;
use crate::sizing::{RiskConfig, SizingError};

pub const DEFAULT_ORDER_LABEL: &str = "ATR Risk Management";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid [risk] section: {0}")]
    Risk(#[from] SizingError),

    #[error("invalid config: {field} = {value}")]
    Invalid { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Label attached to every submitted order.
    pub order_label: String,
    pub risk: RiskConfig,
    pub atr: AtrSettings,
    pub symbol: SymbolSpec,
    pub paper: PaperSettings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            order_label: DEFAULT_ORDER_LABEL.to_string(),
            risk: RiskConfig::default(),
            atr: AtrSettings::default(),
            symbol: SymbolSpec::default(),
            paper: PaperSettings::default(),
        }
    }
}

impl BotConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), symbol = %config.symbol.name, "loaded bot config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.risk.validate()?;

        if self.atr.period == 0 {
            return Err(invalid("atr.period", self.atr.period));
        }
        if self.order_label.trim().is_empty() {
            return Err(invalid("order_label", "\"\""));
        }
        if self.symbol.name.trim().is_empty() {
            return Err(invalid("symbol.name", "\"\""));
        }
        if let Some((field, value)) = self.symbol.invalid_field() {
            return Err(invalid(&format!("symbol.{field}"), value));
        }
        if !self.paper.balance.is_finite() {
            return Err(invalid("paper.balance", self.paper.balance));
        }
        if !self.paper.spread_pips.is_finite() || self.paper.spread_pips < 0.0 {
            return Err(invalid("paper.spread_pips", self.paper.spread_pips));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        value: value.to_string(),
    }
}
