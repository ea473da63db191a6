//! Strategy parameters for one evaluation.

use crate::domain::error::CrossbotError;
use crate::ports::config_port::ConfigPort;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    #[default]
    Paper,
    Live,
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingMode::Paper => write!(f, "paper"),
            TradingMode::Live => write!(f, "live"),
        }
    }
}

impl FromStr for TradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paper" => Ok(TradingMode::Paper),
            "live" => Ok(TradingMode::Live),
            other => Err(format!("unknown mode '{}', expected paper or live", other)),
        }
    }
}

/// `[strategy] mode`, paper when absent.
pub fn trading_mode(config: &dyn ConfigPort) -> Result<TradingMode, CrossbotError> {
    match config.get_string("strategy", "mode") {
        Some(raw) => raw
            .parse()
            .map_err(|reason| CrossbotError::config_invalid("strategy", "mode", reason)),
        None => Ok(TradingMode::default()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub symbol: String,
    pub timeframe: String,
    pub fast_length: usize,
    pub slow_length: usize,
    pub capital: f64,
    pub risk_percent: f64,
    pub mode: TradingMode,
}
