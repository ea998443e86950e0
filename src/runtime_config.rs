// =============================================================================
// Analysis Configuration — window lengths and classification thresholds
// =============================================================================
//
// Every tunable parameter of the trend engine lives here.  All fields carry a
// serde default so that a partial (or empty) JSON file still loads, and adding
// new fields never breaks an older config file.
//
// The report's field names (`sma20`, `sma50`, `sma200`, `average20_day`) are
// part of the output contract and do not follow the configured periods.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma_short_period() -> usize {
    20
}

fn default_sma_medium_period() -> usize {
    50
}

fn default_sma_long_period() -> usize {
    200
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_volume_period() -> usize {
    20
}

fn default_volume_high_pct() -> f64 {
    50.0
}

fn default_volume_low_pct() -> f64 {
    -50.0
}

fn default_level_window() -> usize {
    5
}

fn default_levels_kept() -> usize {
    3
}

// =============================================================================
// AnalysisConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // --- Moving averages ----------------------------------------------------

    /// Period reported as `sma20`; also the fast leg of the trend test.
    #[serde(default = "default_sma_short_period")]
    pub sma_short_period: usize,

    /// Period reported as `sma50`; the slow leg of the trend test.
    #[serde(default = "default_sma_medium_period")]
    pub sma_medium_period: usize,

    /// Period reported as `sma200`.
    #[serde(default = "default_sma_long_period")]
    pub sma_long_period: usize,

    // --- RSI ----------------------------------------------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// RSI strictly above this is Overbought.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// RSI strictly below this is Oversold.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    // --- Volume -------------------------------------------------------------

    /// Length of the average the current volume is compared against.
    #[serde(default = "default_volume_period")]
    pub volume_period: usize,

    /// Percent change strictly above this is a high-volume reading.
    #[serde(default = "default_volume_high_pct")]
    pub volume_high_pct: f64,

    /// Percent change strictly below this is a low-volume reading.
    #[serde(default = "default_volume_low_pct")]
    pub volume_low_pct: f64,

    // --- Support / resistance -----------------------------------------------

    /// Look-around radius of the local-extremum scan.
    #[serde(default = "default_level_window")]
    pub level_window: usize,

    /// How many of the most recent levels of each kind the report keeps.
    #[serde(default = "default_levels_kept")]
    pub levels_kept: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_short_period: default_sma_short_period(),
            sma_medium_period: default_sma_medium_period(),
            sma_long_period: default_sma_long_period(),
            rsi_period: default_rsi_period(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            volume_period: default_volume_period(),
            volume_high_pct: default_volume_high_pct(),
            volume_low_pct: default_volume_low_pct(),
            level_window: default_level_window(),
            levels_kept: default_levels_kept(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults with
    /// a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_period = config.rsi_period,
            level_window = config.level_window,
            "analysis config loaded"
        );

        Ok(config)
    }
}
