use crate::domain::{Bar, Timeframe};

/// Aggregate bars into `timeframe` buckets.
///
/// Buckets are keyed by `timeframe.floor(timestamp)`: first open, highest
/// high, lowest low, last close, summed volume. Input must be time-ordered.
/// The final bucket may be partial; it is emitted as-is, like a live chart's
/// forming bar.
pub fn resample(bars: &[Bar], timeframe: Timeframe) -> Vec<Bar> {
    let mut out: Vec<Bar> = Vec::new();

    for bar in bars {
        let bucket = timeframe.floor(bar.timestamp);
        match out.last_mut() {
            Some(agg) if agg.timestamp == bucket => {
                agg.high = agg.high.max(bar.high);
                agg.low = agg.low.min(bar.low);
                agg.close = bar.close;
                agg.volume += bar.volume;
            }
            _ => out.push(Bar::new(bucket, bar.open, bar.high, bar.low, bar.close, bar.volume)),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_ohlc_bars;

    #[test]
    fn four_m15_bars_make_one_h1() {
        let bars = make_ohlc_bars(&[
            (1.0, 1.5, 0.9, 1.2),
            (1.2, 1.3, 0.8, 1.1),
            (1.1, 1.7, 1.0, 1.6),
            (1.6, 1.6, 1.2, 1.3),
            (1.3, 1.4, 1.25, 1.35),
        ]);
        let h1 = resample(&bars, Timeframe::H1);
        assert_eq!(h1.len(), 2);

        assert_eq!(h1[0].timestamp, bars[0].timestamp);
        assert_eq!(h1[0].open, 1.0);
        assert_eq!(h1[0].high, 1.7);
        assert_eq!(h1[0].low, 0.8);
        assert_eq!(h1[0].close, 1.3);
        assert_eq!(h1[0].volume, 400.0);

        // Forming bar
        assert_eq!(h1[1].open, 1.3);
        assert_eq!(h1[1].close, 1.35);
        assert_eq!(h1[1].volume, 100.0);
    }

    #[test]
    fn same_timeframe_is_identity() {
        let bars = make_ohlc_bars(&[(1.0, 1.5, 0.9, 1.2), (1.2, 1.3, 0.8, 1.1)]);
        assert_eq!(resample(&bars, Timeframe::M15), bars);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(resample(&[], Timeframe::H1).is_empty());
    }
}
