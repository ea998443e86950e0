// =============================================================================
// Support / Resistance — local extremum scan
// =============================================================================
//
// A close is a support level when no neighbour within `window` bars on either
// side is below it, and a resistance level when no neighbour is above it.
// Only indices with a full window on both sides are considered, so the first
// and last `window` bars never qualify.
//
// A flat neighbourhood satisfies both tests and is reported as both support
// and resistance.
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Support,
    Resistance,
}

/// A detected local extremum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub kind: LevelKind,
    pub price: f64,
    /// Position of the bar in the input series.
    pub index: usize,
}

/// Scan `prices` for local extrema over a symmetric look-around `window`.
///
/// Levels come back in series order; when a bar is both, its support entry
/// precedes its resistance entry.
///
/// # Edge cases
/// - `window == 0` => empty vec
/// - `prices.len() < 2 * window + 1` => empty vec, including windows so large
///   that the bound itself does not fit in `usize`
pub fn find_support_resistance(prices: &[f64], window: usize) -> Vec<Level> {
    let too_short = window
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .map_or(true, |min| prices.len() < min);
    if window == 0 || too_short {
        return Vec::new();
    }

    let mut levels = Vec::new();
    for idx in window..prices.len() - window {
        let current = prices[idx];

        if neighbours(prices, idx, window).all(|p| p >= current) {
            levels.push(Level {
                kind: LevelKind::Support,
                price: current,
                index: idx,
            });
        }
        if neighbours(prices, idx, window).all(|p| p <= current) {
            levels.push(Level {
                kind: LevelKind::Resistance,
                price: current,
                index: idx,
            });
        }
    }

    levels
}

/// Every price within `window` bars of `idx`, excluding `idx` itself.
fn neighbours(prices: &[f64], idx: usize, window: usize) -> impl Iterator<Item = f64> + '_ {
    (idx - window..=idx + window)
        .filter(move |&j| j != idx)
        .map(move |j| prices[j])
}

/// Prices of the last `keep` levels of `kind`, oldest first.
pub fn recent_levels(levels: &[Level], kind: LevelKind, keep: usize) -> Vec<f64> {
    let matching: Vec<f64> = levels
        .iter()
        .filter(|l| l.kind == kind)
        .map(|l| l.price)
        .collect();
    let start = matching.len().saturating_sub(keep);
    matching[start..].to_vec()
}
