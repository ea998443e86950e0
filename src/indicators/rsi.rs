// =============================================================================
// Relative Strength Index (RSI) — simple-average variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Take the last `period` deltas between consecutive closes.
// Step 2 — Positive deltas accumulate into gains; the absolute value of every
//          non-positive delta accumulates into losses.
// Step 3 — avg_gain = gains / period,  avg_loss = losses / period
//          (plain averages, no Wilder smoothing).
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI > 70 => Overbought,  RSI < 30 => Oversold.
// =============================================================================

use crate::types::RsiSignal;

/// Compute the RSI of the most recent `period` deltas of `closes`.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `closes.len() < period + 1` => `None` (need `period` deltas)
/// - Average loss of zero (no down moves, including a flat window) => `100.0`
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    let too_short = period.checked_add(1).map_or(true, |min| closes.len() < min);
    if period == 0 || too_short {
        return None;
    }

    let recent = &closes[closes.len() - period - 1..];
    let (gains, losses) = recent.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            (g + delta, l)
        } else {
            (g, l + delta.abs())
        }
    });

    let period_f = period as f64;
    let avg_gain = gains / period_f;
    let avg_loss = losses / period_f;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Map an RSI reading onto its zone. Values exactly on a threshold are
/// Neutral.
pub fn classify_rsi(rsi: f64, overbought: f64, oversold: f64) -> RsiSignal {
    if rsi > overbought {
        RsiSignal::Overbought
    } else if rsi < oversold {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}
