//! Decimal rounding the way the trading host does it.

/// Round `value` to `decimals` places, ties to even.
///
/// `round_to(0.25, 1) == 0.2`, `round_to(0.35, 1) == 0.4`. Values whose
/// binary representation sits just off the midpoint round to the nearer side.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
