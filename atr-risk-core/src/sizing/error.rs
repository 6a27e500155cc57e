use thiserror::Error;

use crate::host::HostError;

/// Why the sizer refused to produce an order plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SizingError {
    /// A reading or configuration value is zero, negative, or not finite.
    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },

    /// The stop-loss rounds to zero pips, so the volume formula would divide by zero.
    #[error("stop-loss rounds to 0 pips (atr_m15={atr_m15}, pip_size={pip_size}, scale_factor={scale_factor})")]
    DivisionByZero {
        atr_m15: f64,
        pip_size: f64,
        scale_factor: f64,
    },

    /// The host refused volume normalization or order submission.
    #[error("host rejection: {0}")]
    HostRejection(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, SizingError>;
