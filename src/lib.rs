// =============================================================================
// stock-trends — technical trend reports from historical candles
// =============================================================================
//
// The engine (`trend_analysis`) is pure and synchronous: candles in, report
// out.  `batch` fans it out across tickers and `prompt` renders a batch for an
// external language model.
// =============================================================================

pub mod batch;
pub mod indicators;
pub mod market_data;
pub mod prompt;
pub mod runtime_config;
pub mod trend_analysis;
pub mod types;

pub use batch::{analyse_batch, TickerInput, TrendResult, TrendsResponse};
pub use market_data::{normalize_candles, Observation};
pub use runtime_config::AnalysisConfig;
pub use trend_analysis::{
    analyse_observations, analyse_payload_at, analyse_stock_trends, NoData, TrendAnalysis,
    TrendReport,
};
pub use types::{Metric, RsiSignal, TrendDirection, VolumeSignal};
