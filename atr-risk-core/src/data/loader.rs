//! CSV bar loader.
//!
//! Expected header: `timestamp,open,high,low,close[,volume]`. Timestamps are
//! naive UTC in `%Y-%m-%d %H:%M:%S` (a `T` separator is accepted too).

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{DataError, Result};
use crate::domain::Bar;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Read and validate bars from any CSV source.
///
/// Rows must be sane and strictly increasing in time.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars: Vec<Bar> = Vec::new();

    for (i, record) in rdr.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let row = i + 2;
        let rec = record?;
        let timestamp = parse_timestamp(&rec.timestamp).ok_or_else(|| DataError::Timestamp {
            row,
            value: rec.timestamp.clone(),
        })?;

        let bar = Bar::new(
            timestamp,
            rec.open,
            rec.high,
            rec.low,
            rec.close,
            rec.volume.unwrap_or(0.0),
        );
        bar.validate().map_err(|source| DataError::InvalidBar { row, source })?;

        if let Some(prev) = bars.last() {
            if bar.timestamp <= prev.timestamp {
                return Err(DataError::OutOfOrder { row, timestamp });
            }
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(bars)
}

/// Load bars from a CSV file on disk.
pub fn load_bars_csv(path: impl AsRef<Path>) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bars = read_bars(file)?;
    tracing::debug!(path = %path.display(), bars = bars.len(), "loaded bars");
    Ok(bars)
}
