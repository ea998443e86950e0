// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators that make up a
// trend report.  Windowed calculations return `Option<T>` so callers are
// forced to handle the insufficient-history case.

pub mod levels;
pub mod rsi;
pub mod sma;
pub mod volume;
