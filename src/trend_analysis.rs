// =============================================================================
// Trend Analysis — assemble the indicator bundle for one instrument
// =============================================================================
//
// Turns a chronological candle series into a `TrendReport`:
//
//   moving averages   SMA 20 / 50 / 200 of closes
//   momentum          RSI 14 and its zone
//   volume            current volume vs. its 20-bar average
//   levels            last 3 supports / resistances from a +-5 bar scan
//   direction         price > SMA20 > SMA50 => Bullish
//                     price < SMA20 < SMA50 => Bearish
//
// Insufficient history never fails the analysis: the affected field is marked
// unavailable and everything else is still computed.  Only an empty series
// short-circuits, producing an error-marker report instead.
// =============================================================================

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::indicators::levels::{find_support_resistance, recent_levels, LevelKind};
use crate::indicators::rsi::{calculate_rsi, classify_rsi};
use crate::indicators::sma::calculate_sma;
use crate::indicators::volume::{calculate_volume_trend, format_percent};
use crate::market_data::{normalize_candles, Observation};
use crate::runtime_config::AnalysisConfig;
use crate::types::{Metric, RsiSignal, TrendDirection, VolumeSignal};

// =============================================================================
// Report types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAverages {
    pub sma20: Metric,
    pub sma50: Metric,
    pub sma200: Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeTrendReport {
    pub current: u64,
    /// Average volume rounded to a whole number.
    pub average20_day: Metric,
    /// Unrounded percent change; serialised as e.g. `"12.34%"`.
    #[serde(serialize_with = "serialize_percent")]
    pub percent_change: f64,
    pub signal: VolumeSignal,
}

impl VolumeTrendReport {
    pub fn percent_change_display(&self) -> String {
        format_percent(self.percent_change)
    }
}

/// Full indicator snapshot for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub current_price: f64,
    pub moving_averages: MovingAverages,
    pub rsi: Metric,
    pub rsi_signal: RsiSignal,
    pub volume_trend: VolumeTrendReport,
    /// Most recent support prices, oldest first.
    pub support_levels: Vec<f64>,
    /// Most recent resistance prices, oldest first.
    pub resistance_levels: Vec<f64>,
    pub overall_trend: TrendDirection,
    /// Generation instant, serialised as `2024-03-01T12:00:00.000000+00:00`.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Why a report could not be produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoData {
    #[serde(rename = "No stock data available")]
    Stock,
    #[serde(rename = "No price data available")]
    Price,
}

impl std::fmt::Display for NoData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stock => write!(f, "No stock data available"),
            Self::Price => write!(f, "No price data available"),
        }
    }
}

/// Outcome of one analysis: a report, or `{"error": "..."}` on empty input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendAnalysis {
    Report(TrendReport),
    Empty { error: NoData },
}

impl TrendAnalysis {
    pub fn report(&self) -> Option<&TrendReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Empty { .. } => None,
        }
    }

    pub fn error(&self) -> Option<NoData> {
        match self {
            Self::Report(_) => None,
            Self::Empty { error } => Some(*error),
        }
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Analyse a raw candle payload (`{"candles": [...]}` or `[...]`), stamping
/// the report with the current time.
pub fn analyse_stock_trends(raw: &Value, config: &AnalysisConfig) -> TrendAnalysis {
    analyse_payload_at(raw, config, Utc::now())
}

/// Same as [`analyse_stock_trends`] with an explicit report timestamp.
pub fn analyse_payload_at(
    raw: &Value,
    config: &AnalysisConfig,
    timestamp: DateTime<Utc>,
) -> TrendAnalysis {
    let observations = normalize_candles(raw);
    analyse_observations(&observations, config, timestamp)
}

/// Analyse an already-normalized, chronological observation series.
pub fn analyse_observations(
    observations: &[Observation],
    config: &AnalysisConfig,
    timestamp: DateTime<Utc>,
) -> TrendAnalysis {
    if observations.is_empty() {
        warn!("No stock data available for analysis");
        return TrendAnalysis::Empty {
            error: NoData::Stock,
        };
    }

    let prices: Vec<f64> = observations.iter().map(|o| o.close).collect();
    let volumes: Vec<u64> = observations.iter().map(|o| o.volume).collect();

    let Some(&current_price) = prices.last() else {
        warn!("No price data available for analysis");
        return TrendAnalysis::Empty {
            error: NoData::Price,
        };
    };

    // --- Moving averages -----------------------------------------------------
    let sma20 = calculate_sma(&prices, config.sma_short_period);
    let sma50 = calculate_sma(&prices, config.sma_medium_period);
    let sma200 = calculate_sma(&prices, config.sma_long_period);

    // --- Momentum ------------------------------------------------------------
    let rsi = calculate_rsi(&prices, config.rsi_period);
    let rsi_signal = rsi.map_or(RsiSignal::Neutral, |v| {
        classify_rsi(v, config.rsi_overbought, config.rsi_oversold)
    });

    // --- Volume --------------------------------------------------------------
    let volume = calculate_volume_trend(
        &volumes,
        config.volume_period,
        config.volume_high_pct,
        config.volume_low_pct,
    );

    // --- Support / resistance ------------------------------------------------
    let levels = find_support_resistance(&prices, config.level_window);
    let support_levels = recent_levels(&levels, LevelKind::Support, config.levels_kept);
    let resistance_levels = recent_levels(&levels, LevelKind::Resistance, config.levels_kept);

    let overall_trend = classify_trend(current_price, sma20, sma50);

    let report = TrendReport {
        current_price,
        moving_averages: MovingAverages {
            sma20: Metric::from(sma20).map(round2),
            sma50: Metric::from(sma50).map(round2),
            sma200: Metric::from(sma200).map(round2),
        },
        rsi: Metric::from(rsi).map(round2),
        rsi_signal,
        volume_trend: VolumeTrendReport {
            current: volume.current,
            average20_day: Metric::from(volume.average).map(f64::round_ties_even),
            percent_change: volume.percent_change,
            signal: volume.signal,
        },
        support_levels: support_levels.into_iter().map(round2).collect(),
        resistance_levels: resistance_levels.into_iter().map(round2).collect(),
        overall_trend,
        timestamp,
    };

    debug!(
        trend = %report.overall_trend,
        rsi = %report.rsi,
        volume_signal = %report.volume_trend.signal,
        candles = observations.len(),
        "Analysis computed"
    );

    TrendAnalysis::Report(report)
}

// =============================================================================
// Classification
// =============================================================================

/// Directional label from the strict nested ordering of price and the short
/// and medium SMAs. Either SMA missing => Neutral.
pub fn classify_trend(
    current_price: f64,
    sma_short: Option<f64>,
    sma_medium: Option<f64>,
) -> TrendDirection {
    let (Some(short), Some(medium)) = (sma_short, sma_medium) else {
        return TrendDirection::Neutral;
    };

    if current_price > short && short > medium {
        TrendDirection::Bullish
    } else if current_price < short && short < medium {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Two-decimal rounding with exact ties going to the even cent.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn serialize_timestamp<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, false))
}

fn serialize_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_percent(*value))
}
