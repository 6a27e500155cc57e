//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! TR[0] has no previous close and is excluded from the average, so the
//! first valid ATR sits at index `period`.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Moving average applied to the true range series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Rolling arithmetic mean of the last `period` true ranges.
    #[default]
    Simple,
    /// Wilder's recursive smoothing, alpha = 1/period, seeded with the mean.
    Wilder,
}

/// ATR request parameters, shared by both timeframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AtrSettings {
    pub period: usize,
    pub smoothing: Smoothing,
}

impl Default for AtrSettings {
    fn default() -> Self {
        Self {
            period: 14,
            smoothing: Smoothing::Simple,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    smoothing: Smoothing,
    name: String,
}

impl Atr {
    pub fn new(period: usize, smoothing: Smoothing) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        let suffix = match smoothing {
            Smoothing::Simple => "",
            Smoothing::Wilder => "_wilder",
        };
        Self {
            period,
            smoothing,
            name: format!("atr_{period}{suffix}"),
        }
    }

    pub fn from_settings(settings: &AtrSettings) -> Self {
        Self::new(settings.period, settings.smoothing)
    }
}

/// True range per bar. Index 0 has no previous close and stays NaN, as does
/// any bar touching a NaN price.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    std::iter::once(f64::NAN)
        .chain(bars.windows(2).map(|pair| {
            let (prev_close, bar) = (pair[0].close, &pair[1]);
            let spans = [
                bar.high - bar.low,
                (bar.high - prev_close).abs(),
                (bar.low - prev_close).abs(),
            ];
            if spans.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                spans.into_iter().fold(0.0, f64::max)
            }
        }))
        .take(bars.len())
        .collect()
}

/// Rolling mean over `period` values. Windows containing NaN yield NaN.
pub fn simple_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }
    for end in period..=n {
        let window = &values[end - period..end];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[end - 1] = window.iter().sum::<f64>() / period as f64;
    }
    result
}

/// Apply Wilder smoothing to a series. Alpha = 1/period.
/// Seed: mean of the first `period` consecutive valid values. A NaN after the
/// seed poisons the rest of the series.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    let seed_start = (0..=n - period).find(|&i| values[i..i + period].iter().all(|v| !v.is_nan()));
    let Some(seed_start) = seed_start else {
        return result;
    };
    let seed_end = seed_start + period;

    let seed: f64 = values[seed_start..seed_end].iter().sum::<f64>() / period as f64;
    result[seed_end - 1] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;

    for i in seed_end..n {
        if values[i].is_nan() {
            return result;
        }
        let smoothed = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = smoothed;
        prev = smoothed;
    }

    result
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let tr = true_range(bars);
        match self.smoothing {
            Smoothing::Simple => simple_smooth(&tr, self.period),
            Smoothing::Wilder => wilder_smooth(&tr, self.period),
        }
    }
}
