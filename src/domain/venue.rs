//! Explicit venue selection for market data and order transmission.

use crate::domain::error::CrossbotError;
use crate::ports::config_port::ConfigPort;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSinkKind {
    Journal,
    Log,
}

impl FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(DataSourceKind::Csv),
            other => Err(format!("unknown data source '{}', expected csv", other)),
        }
    }
}

impl FromStr for OrderSinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "journal" => Ok(OrderSinkKind::Journal),
            "log" => Ok(OrderSinkKind::Log),
            other => Err(format!(
                "unknown order sink '{}', expected journal or log",
                other
            )),
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceKind::Csv => write!(f, "csv"),
        }
    }
}

impl fmt::Display for OrderSinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSinkKind::Journal => write!(f, "journal"),
            OrderSinkKind::Log => write!(f, "log"),
        }
    }
}

/// `[market_data] source`, defaulting to `csv`.
pub fn data_source_kind(config: &dyn ConfigPort) -> Result<DataSourceKind, CrossbotError> {
    match config.get_string("market_data", "source") {
        Some(raw) => raw
            .parse()
            .map_err(|reason| CrossbotError::config_invalid("market_data", "source", reason)),
        None => Ok(DataSourceKind::Csv),
    }
}

/// `[execution] order_sink`, defaulting to `log`.
pub fn order_sink_kind(config: &dyn ConfigPort) -> Result<OrderSinkKind, CrossbotError> {
    match config.get_string("execution", "order_sink") {
        Some(raw) => raw
            .parse()
            .map_err(|reason| CrossbotError::config_invalid("execution", "order_sink", reason)),
        None => Ok(OrderSinkKind::Log),
    }
}
