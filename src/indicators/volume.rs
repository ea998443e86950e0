// =============================================================================
// Volume Trend
// =============================================================================
//
// Compares the most recent volume with its simple moving average:
//
//   percent_change = (current - average) / average * 100
//
// When the average cannot be computed (short history) or is zero, the percent
// change is reported as 0.0, i.e. "no signal", rather than marked unavailable.
//
// Thresholds:  > +50% => High Volume (Bullish),  < -50% => Low Volume (Bearish).
// =============================================================================

use crate::indicators::sma::calculate_sma;
use crate::types::VolumeSignal;

/// Snapshot of the current volume against its average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeTrend {
    /// Volume of the most recent observation (0 when there is none).
    pub current: u64,
    /// SMA of volume over the configured period, unrounded.
    pub average: Option<f64>,
    pub percent_change: f64,
    pub signal: VolumeSignal,
}

/// Compute the volume trend of `volumes` (oldest first).
pub fn calculate_volume_trend(
    volumes: &[u64],
    period: usize,
    high_pct: f64,
    low_pct: f64,
) -> VolumeTrend {
    let as_f64: Vec<f64> = volumes.iter().map(|&v| v as f64).collect();
    let average = calculate_sma(&as_f64, period);
    let current = volumes.last().copied().unwrap_or(0);

    let percent_change = percent_change(current as f64, average);

    VolumeTrend {
        current,
        average,
        percent_change,
        signal: classify_volume(percent_change, high_pct, low_pct),
    }
}

/// Percent difference of `current` from `average`; 0.0 when the average is
/// missing or zero.
pub fn percent_change(current: f64, average: Option<f64>) -> f64 {
    match average {
        Some(avg) if avg != 0.0 => (current - avg) / avg * 100.0,
        _ => 0.0,
    }
}

pub fn classify_volume(percent_change: f64, high_pct: f64, low_pct: f64) -> VolumeSignal {
    if percent_change > high_pct {
        VolumeSignal::HighVolumeBullish
    } else if percent_change < low_pct {
        VolumeSignal::LowVolumeBearish
    } else {
        VolumeSignal::Normal
    }
}

/// Render a percent value the way reports display it, e.g. `"12.34%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}
