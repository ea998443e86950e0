// =============================================================================
// Batch Analysis — one trend report per ticker, computed in parallel
// =============================================================================
//
// Each ticker's analysis only reads its own candle payload, so the analyses
// run independently on tokio's blocking pool and are re-assembled in the
// order the tickers were given.
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::runtime_config::AnalysisConfig;
use crate::trend_analysis::{analyse_stock_trends, TrendAnalysis};

/// Raw candle payload for a single instrument.
#[derive(Debug, Clone)]
pub struct TickerInput {
    pub ticker: String,
    pub figi: Option<String>,
    pub payload: Value,
}

impl TickerInput {
    pub fn new(ticker: impl Into<String>, payload: Value) -> Self {
        Self {
            ticker: ticker.into(),
            figi: None,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub figi: Option<String>,
    pub ticker: Option<String>,
    pub analysis: TrendAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsResponse {
    pub results: Vec<TrendResult>,
}

/// Analyse every input and return the results in input order.
///
/// Ticker names are trimmed and blank entries dropped; if nothing is left the
/// batch is rejected.
pub async fn analyse_batch(
    inputs: Vec<TickerInput>,
    config: Arc<AnalysisConfig>,
) -> Result<TrendsResponse> {
    let inputs: Vec<TickerInput> = inputs
        .into_iter()
        .filter_map(|mut input| {
            let trimmed = input.ticker.trim();
            if trimmed.is_empty() {
                return None;
            }
            input.ticker = trimmed.to_string();
            Some(input)
        })
        .collect();

    if inputs.is_empty() {
        anyhow::bail!("tickers must be provided");
    }

    let total = inputs.len();
    let mut tasks = JoinSet::new();
    for (position, input) in inputs.into_iter().enumerate() {
        let config = config.clone();
        tasks.spawn_blocking(move || {
            let analysis = analyse_stock_trends(&input.payload, &config);
            debug!(ticker = %input.ticker, error = ?analysis.error(), "ticker analysed");
            (
                position,
                TrendResult {
                    figi: input.figi,
                    ticker: Some(input.ticker),
                    analysis,
                },
            )
        });
    }

    let mut slots: Vec<Option<TrendResult>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (position, result) = joined.context("trend analysis task failed")?;
        slots[position] = Some(result);
    }

    let results: Vec<TrendResult> = slots.into_iter().flatten().collect();
    info!(count = results.len(), "Analysed trends for tickers");

    Ok(TrendsResponse { results })
}
