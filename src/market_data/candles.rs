use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Denominator of the fixed-point `nano` part of a broker quotation.
const NANO_SCALE: f64 = 1_000_000_000.0;

/// One normalized candle: the only two fields the trend engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub close: f64,
    pub volume: u64,
}

impl Observation {
    pub fn new(close: f64, volume: u64) -> Self {
        Self { close, volume }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a raw candle payload into chronological observations.
///
/// Accepts either `{ "candles": [...] }` or a bare `[...]` of candle records.
/// Anything else (null, scalars, an object without a `candles` array) yields
/// an empty vec. Individual records never abort the batch: a record that is
/// not an object, or lacks a usable `close`, becomes a zero observation.
///
/// Expected record shape (extra fields are ignored):
/// ```json
/// { "close": { "units": "101", "nano": 500000000 }, "volume": "1200" }
/// ```
pub fn normalize_candles(payload: &Value) -> Vec<Observation> {
    let candles = match payload {
        Value::Object(map) => map.get("candles"),
        other => Some(other),
    };

    let Some(Value::Array(records)) = candles else {
        return Vec::new();
    };

    let mut degraded = 0usize;
    let observations: Vec<Observation> = records
        .iter()
        .map(|record| match record {
            Value::Object(fields) => Observation {
                close: quotation_to_f64(fields.get("close")),
                volume: coerce_volume(fields.get("volume")),
            },
            _ => {
                degraded += 1;
                Observation::new(0.0, 0)
            }
        })
        .collect();

    debug!(count = observations.len(), degraded, "candles normalized");

    observations
}

/// Convert a broker quotation `{units, nano}` into a float price.
///
/// Both parts may arrive as JSON numbers or numeric strings; a missing part
/// counts as zero. A close that is already a plain number is passed through so
/// that normalized observations can be fed back in unchanged.
pub fn quotation_to_f64(quotation: Option<&Value>) -> f64 {
    match quotation {
        Some(Value::Object(parts)) => {
            let units = parts.get("units").and_then(parse_numeric).unwrap_or(0.0);
            let nano = parts.get("nano").and_then(parse_numeric).unwrap_or(0.0);
            units + nano / NANO_SCALE
        }
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce a raw volume into a non-negative integer.
///
/// - integers pass through
/// - floats are truncated toward zero
/// - strings must hold an integer (`"12.5"` is not one)
/// - negatives, non-finite values and every other JSON type become `0`
pub fn coerce_volume(volume: Option<&Value>) -> u64 {
    match volume {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                v
            } else if n.is_i64() {
                0
            } else {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map_or(0, |v| v.trunc() as u64)
            }
        }
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Broker numbers may be JSON numbers or strings holding a number.
fn parse_numeric(val: &Value) -> Option<f64> {
    let parsed = match val {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_and_bare_payloads_agree() {
        let records = json!([
            { "close": { "units": 100, "nano": 250_000_000 }, "volume": 10 },
            { "close": { "units": 101, "nano": 0 }, "volume": 20 }
        ]);
        let wrapped = json!({ "candles": records.clone() });

        let from_bare = normalize_candles(&records);
        let from_wrapped = normalize_candles(&wrapped);
        assert_eq!(from_bare, from_wrapped);
        assert_eq!(from_bare[0], Observation::new(100.25, 10));
        assert_eq!(from_bare[1], Observation::new(101.0, 20));
    }

    #[test]
    fn unusable_payloads_yield_empty() {
        assert!(normalize_candles(&Value::Null).is_empty());
        assert!(normalize_candles(&json!({})).is_empty());
        assert!(normalize_candles(&json!({ "candles": null })).is_empty());
        assert!(normalize_candles(&json!({ "candles": "nope" })).is_empty());
        assert!(normalize_candles(&json!(42)).is_empty());
        assert!(normalize_candles(&json!([])).is_empty());
    }

    #[test]
    fn malformed_records_become_zero_observations() {
        let payload = json!({ "candles": [
            "garbage",
            { "volume": 5 },
            { "close": {}, "volume": null },
            { "close": { "units": 7, "nano": 0 }, "volume": 3 }
        ]});
        let obs = normalize_candles(&payload);
        assert_eq!(obs.len(), 4);
        assert_eq!(obs[0], Observation::new(0.0, 0));
        assert_eq!(obs[1], Observation::new(0.0, 5));
        assert_eq!(obs[2], Observation::new(0.0, 0));
        assert_eq!(obs[3], Observation::new(7.0, 3));
    }

    #[test]
    fn quotation_accepts_string_parts() {
        let q = json!({ "units": "250", "nano": "500000000" });
        assert!((quotation_to_f64(Some(&q)) - 250.5).abs() < 1e-12);

        let only_nano = json!({ "nano": 10_000_000 });
        assert!((quotation_to_f64(Some(&only_nano)) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn quotation_passes_plain_numbers_through() {
        assert!((quotation_to_f64(Some(&json!(123.45))) - 123.45).abs() < 1e-12);
        assert_eq!(quotation_to_f64(Some(&json!("123.45"))), 0.0);
        assert_eq!(quotation_to_f64(None), 0.0);
    }

    #[test]
    fn volume_coercion_rules() {
        assert_eq!(coerce_volume(Some(&json!(1200))), 1200);
        assert_eq!(coerce_volume(Some(&json!(12.9))), 12);
        assert_eq!(coerce_volume(Some(&json!("1200"))), 1200);
        assert_eq!(coerce_volume(Some(&json!(" 42 "))), 42);
        assert_eq!(coerce_volume(Some(&json!("12.5"))), 0);
        assert_eq!(coerce_volume(Some(&json!("abc"))), 0);
        assert_eq!(coerce_volume(Some(&json!(-5))), 0);
        assert_eq!(coerce_volume(Some(&json!(-5.5))), 0);
        assert_eq!(coerce_volume(Some(&json!(true))), 0);
        assert_eq!(coerce_volume(Some(&json!([1]))), 0);
        assert_eq!(coerce_volume(None), 0);
    }
}
