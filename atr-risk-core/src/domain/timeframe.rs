//! Chart timeframes the bot reads ATR from.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// 15-minute bars. Drives the stop-loss distance.
    M15,
    /// Hourly bars. Display only.
    H1,
}

impl Timeframe {
    pub fn minutes(&self) -> u32 {
        match self {
            Timeframe::M15 => 15,
            Timeframe::H1 => 60,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.minutes() as i64)
    }

    /// Start of the bucket containing `ts`.
    pub fn floor(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let minute = ts.minute() - ts.minute() % self.minutes();
        ts.date()
            .and_hms_opt(ts.hour(), minute, 0)
            .unwrap_or(ts)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::M15 => f.write_str("M15"),
            Timeframe::H1 => f.write_str("H1"),
        }
    }
}
