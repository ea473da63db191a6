//! Candle (OHLCV bar) representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Close prices in candle order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// The last `len` candles, or all of them when fewer exist.
pub fn trailing_window(candles: &[Candle], len: usize) -> &[Candle] {
    &candles[candles.len().saturating_sub(len)..]
}

/// Lowest low over `candles`; `+inf` for an empty slice.
pub fn lowest_low(candles: &[Candle]) -> f64 {
    candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min)
}

/// Highest high over `candles`; `-inf` for an empty slice.
pub fn highest_high(candles: &[Candle]) -> f64 {
    candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max)
}
