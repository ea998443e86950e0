// =============================================================================
// Shared types used across the trend-analysis engine
// =============================================================================

use serde::{Serialize, Serializer};

/// Sentinel rendered in place of a value that could not be computed.
pub const UNAVAILABLE: &str = "N/A";

/// A computed indicator value, or an explicit marker that there was not
/// enough history to compute it.
///
/// Serialises as a plain number when available and as `"N/A"` otherwise, so a
/// computed `0.0` is never confused with "not enough data".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Available(f64),
    Unavailable,
}

impl Metric {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(v),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Available(v) => Self::Available(f(v)),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::Available)
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(v) => serializer.serialize_f64(*v),
            Self::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(v) => write!(f, "{v}"),
            Self::Unavailable => write!(f, "{UNAVAILABLE}"),
        }
    }
}

/// RSI zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

impl std::fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "Overbought"),
            Self::Oversold => write!(f, "Oversold"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Reading of the current volume against its 20-period average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolumeSignal {
    #[serde(rename = "High Volume (Bullish)")]
    HighVolumeBullish,
    #[serde(rename = "Low Volume (Bearish)")]
    LowVolumeBearish,
    Normal,
}

impl std::fmt::Display for VolumeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighVolumeBullish => write!(f, "High Volume (Bullish)"),
            Self::LowVolumeBearish => write!(f, "Low Volume (Bearish)"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

/// Overall direction derived from price vs. the short and medium SMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_serialises_number_or_sentinel() {
        assert_eq!(serde_json::to_string(&Metric::Available(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Metric::Unavailable).unwrap(), "\"N/A\"");
    }

    #[test]
    fn metric_from_option() {
        assert_eq!(Metric::from(Some(2.0)), Metric::Available(2.0));
        assert_eq!(Metric::from(None), Metric::Unavailable);
        assert!(Metric::Available(0.0).is_available());
        assert_eq!(Metric::Unavailable.map(|v| v * 2.0), Metric::Unavailable);
    }

    #[test]
    fn volume_signal_uses_display_labels() {
        let json = serde_json::to_string(&VolumeSignal::HighVolumeBullish).unwrap();
        assert_eq!(json, "\"High Volume (Bullish)\"");
        assert_eq!(VolumeSignal::LowVolumeBearish.to_string(), "Low Volume (Bearish)");
    }
}
