//! Bar data for the paper host: CSV loading, timeframe resampling, and
//! deterministic synthetic series.

pub mod loader;
pub mod resample;
pub mod synthetic;

pub use loader::{load_bars_csv, read_bars};
pub use resample::resample;
pub use synthetic::{synthetic_bars, SyntheticOptions};

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::BarError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unparseable timestamp '{value}'")]
    Timestamp { row: usize, value: String },

    #[error("row {row}: {source}")]
    InvalidBar {
        row: usize,
        #[source]
        source: BarError,
    },

    #[error("row {row}: timestamp {timestamp} is not after the previous bar")]
    OutOfOrder { row: usize, timestamp: NaiveDateTime },

    #[error("no bars found")]
    Empty,
}

pub type Result<T> = std::result::Result<T, DataError>;
