//! Deterministic random-walk bars for demos and tests.

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Bar, Timeframe};

#[derive(Debug, Clone)]
pub struct SyntheticOptions {
    pub start: NaiveDateTime,
    pub start_price: f64,
    pub pip_size: f64,
    /// Largest close-to-close move per bar, in pips.
    pub max_move_pips: f64,
    /// Largest wick beyond the body, in pips.
    pub max_wick_pips: f64,
    pub timeframe: Timeframe,
}

impl Default for SyntheticOptions {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 2)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            start_price: 1.1000,
            pip_size: 0.0001,
            max_move_pips: 8.0,
            max_wick_pips: 4.0,
            timeframe: Timeframe::M15,
        }
    }
}

/// Generate `count` bars. The same `(symbol, seed)` always yields the same series.
pub fn synthetic_bars(symbol: &str, seed: u64, count: usize, opts: &SyntheticOptions) -> Vec<Bar> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(symbol.as_bytes());
    hasher.update(&seed.to_le_bytes());
    let mut rng = StdRng::from_seed(*hasher.finalize().as_bytes());

    let step = opts.timeframe.duration();
    let mut bars = Vec::with_capacity(count);
    let mut price = opts.start_price;
    let mut ts = opts.start;

    for _ in 0..count {
        let open = price;
        let moved = rng.gen_range(-opts.max_move_pips..=opts.max_move_pips) * opts.pip_size;
        // Floor keeps the walk strictly positive.
        let close = (open + moved).max(opts.pip_size * 10.0);
        let high = open.max(close) + rng.gen_range(0.0..=opts.max_wick_pips) * opts.pip_size;
        let low = (open.min(close) - rng.gen_range(0.0..=opts.max_wick_pips) * opts.pip_size)
            .max(opts.pip_size);
        let volume = rng.gen_range(50..500u32) as f64;

        bars.push(Bar::new(ts, open, high, low, close, volume));

        price = close;
        ts += step;
    }

    bars
}
