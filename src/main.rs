// =============================================================================
// stock-trends — CLI Entry Point
// =============================================================================
//
// Reads candle payloads from local JSON files (one per ticker), runs the trend
// engine over each and prints either the JSON results or the LLM prompt built
// from them.  Logs go to stderr so stdout stays machine-readable.
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stock_trends::prompt::{render_user_prompt, DEFAULT_USER_PROMPT};
use stock_trends::{analyse_batch, AnalysisConfig, TickerInput};

const DEFAULT_CONFIG_PATH: &str = "analysis_config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Trend results as pretty-printed JSON
    Json,
    /// User prompt for an LLM with the results embedded
    Prompt,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Technical trend reports from historical candles")]
struct Args {
    /// Candle files as TICKER=path.json, or path.json to use the file stem as ticker
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Analysis config (JSON); falls back to $TRENDS_CONFIG, then analysis_config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Prompt template containing a {JSON_DATA} placeholder
    #[arg(long)]
    prompt_template: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    // ── 2. Config ────────────────────────────────────────────────────────
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("TRENDS_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = AnalysisConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalysisConfig::default()
    });

    // ── 3. Inputs ────────────────────────────────────────────────────────
    let inputs = args
        .inputs
        .iter()
        .map(|arg| load_input(arg.as_str()))
        .collect::<Result<Vec<_>>>()?;

    info!(count = inputs.len(), "Candle files loaded");

    // ── 4. Analyse & print ───────────────────────────────────────────────
    let response = analyse_batch(inputs, Arc::new(config)).await?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)
            .context("failed to serialise trend results")?,
        OutputFormat::Prompt => {
            let template = match &args.prompt_template {
                Some(path) => std::fs::read_to_string(path).with_context(|| {
                    format!("failed to read prompt template from {}", path.display())
                })?,
                None => DEFAULT_USER_PROMPT.to_string(),
            };
            render_user_prompt(&template, &response)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Split `TICKER=path` into its parts; a bare path uses its file stem.
fn parse_input_arg(arg: &str) -> Result<(String, PathBuf)> {
    if let Some((ticker, path)) = arg.split_once('=') {
        return Ok((ticker.to_string(), PathBuf::from(path)));
    }

    let path = PathBuf::from(arg);
    let ticker = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("cannot derive a ticker from {arg}"))?
        .to_string();
    Ok((ticker, path))
}

fn load_input(arg: &str) -> Result<TickerInput> {
    let (ticker, path) = parse_input_arg(arg)?;
    let payload = read_payload(&path)?;
    Ok(TickerInput::new(ticker, payload))
}

fn read_payload(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read candles from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse candles from {}", path.display()))
}
