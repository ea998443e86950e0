use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use stock_trends::indicators::levels::find_support_resistance;
use stock_trends::indicators::sma::calculate_sma;
use stock_trends::{
    analyse_observations, analyse_payload_at, analyse_stock_trends, normalize_candles,
    AnalysisConfig, Metric, NoData, RsiSignal, TrendDirection, VolumeSignal,
};

fn build_candles(count: i64) -> Vec<Value> {
    (0..count)
        .map(|i| json!({ "close": { "units": 100 + i, "nano": 0 }, "volume": 1_000 + i }))
        .collect()
}

#[test]
fn empty_inputs_report_no_stock_data() {
    let config = AnalysisConfig::default();
    for payload in [json!({ "candles": [] }), json!([])] {
        let result = analyse_stock_trends(&payload, &config);
        assert_eq!(result.error(), Some(NoData::Stock));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "error": "No stock data available" })
        );
    }
}

#[test]
fn sixty_rising_candles_are_bullish() {
    let payload = json!({ "candles": build_candles(60) });
    let result = analyse_stock_trends(&payload, &AnalysisConfig::default());
    let report = result.report().expect("report");

    assert_eq!(report.current_price, 159.0);
    let sma20 = report.moving_averages.sma20.value().expect("sma20");
    let sma50 = report.moving_averages.sma50.value().expect("sma50");
    assert!(sma20 < report.current_price);
    assert!(sma50 < report.current_price);
    assert!((sma20 - 149.5).abs() < 1e-10);
    assert!((sma50 - 134.5).abs() < 1e-10);
    assert_eq!(report.moving_averages.sma200, Metric::Unavailable);
    assert_eq!(report.overall_trend, TrendDirection::Bullish);

    assert_eq!(report.rsi, Metric::Available(100.0));
    assert_eq!(report.rsi_signal, RsiSignal::Overbought);

    // Current volume 1059 vs. average 1049.5 => +0.91%
    assert_eq!(report.volume_trend.current, 1_059);
    assert_eq!(report.volume_trend.average20_day, Metric::Available(1_050.0));
    assert_eq!(report.volume_trend.percent_change_display(), "0.91%");
    assert_eq!(report.volume_trend.signal, VolumeSignal::Normal);

    assert!(report.support_levels.is_empty());
    assert!(report.resistance_levels.is_empty());
}

#[test]
fn forty_candles_have_no_medium_average() {
    let payload = json!({ "candles": build_candles(40) });
    let result = analyse_stock_trends(&payload, &AnalysisConfig::default());
    let report = result.report().expect("report");

    assert!(report.moving_averages.sma20.is_available());
    assert_eq!(report.moving_averages.sma50, Metric::Unavailable);
    assert_eq!(report.overall_trend, TrendDirection::Neutral);
}

#[test]
fn raw_wrapper_and_observation_list_agree() {
    let config = AnalysisConfig::default();
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();

    let raw = json!({ "candles": build_candles(30) });
    let observations = normalize_candles(&raw);

    let from_raw = analyse_payload_at(&raw, &config, at);
    let from_observations = analyse_observations(&observations, &config, at);
    assert_eq!(from_raw, from_observations);

    // Feeding the normalized list back through the payload path is a no-op.
    let normalized_json = serde_json::to_value(&observations).unwrap();
    let from_normalized_json = analyse_payload_at(&normalized_json, &config, at);
    assert_eq!(from_raw, from_normalized_json);
}

#[test]
fn sma_boundary_lengths() {
    let series: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    assert!(calculate_sma(&series[..19], 20).is_none());
    assert_eq!(calculate_sma(&series, 20), Some(10.5));
}

#[test]
fn increasing_series_has_no_levels() {
    let prices: Vec<f64> = (0..11).map(|i| 100.0 + i as f64).collect();
    assert!(find_support_resistance(&prices, 5).is_empty());
}

#[test]
fn constant_volume_is_zero_percent() {
    let candles: Vec<Value> = (0..25)
        .map(|i| json!({ "close": { "units": 50 + (i % 3), "nano": 0 }, "volume": "500" }))
        .collect();
    let result = analyse_stock_trends(&json!(candles), &AnalysisConfig::default());
    let report = result.report().expect("report");

    let value = serde_json::to_value(report).unwrap();
    assert_eq!(value["volume_trend"]["percent_change"], json!("0.00%"));
    assert_eq!(value["volume_trend"]["signal"], json!("Normal"));
    assert_eq!(value["volume_trend"]["average20_day"], json!(500.0));
}

#[test]
fn malformed_records_do_not_abort() {
    let mut candles = build_candles(25);
    candles.insert(3, json!("not a candle"));
    candles.insert(7, json!({ "volume": "n/a" }));

    let result = analyse_stock_trends(&json!({ "candles": candles }), &AnalysisConfig::default());
    let report = result.report().expect("report");
    assert_eq!(report.current_price, 124.0);
    assert!(report.rsi.is_available());
}
