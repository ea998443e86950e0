// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the most recent `period` values:
//
//   SMA = (x_{n-period} + ... + x_{n-1}) / period
//
// Used on closing prices (20 / 50 / 200) and on volumes (20).
// =============================================================================

/// Mean of the last `period` entries of `values`.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `values.len() < period` => `None` (not enough history is expected, not a
///   fault)
/// - `values.len() == period` => mean of the whole slice
pub fn calculate_sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}
