//! Technical indicators used by the signal pipeline.
//!
//! Series are aligned 1:1 with the input: index `i` of an indicator series
//! corresponds to input value `i`, with `None` during warmup.

pub mod sma;

use std::fmt;

/// A moving-average series aligned with its input.
pub type MaSeries = Vec<Option<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
        }
    }
}
