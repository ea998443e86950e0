pub mod candles;

// Re-export for convenient access (e.g. `use crate::market_data::Observation`).
pub use candles::{normalize_candles, Observation};
