//! Configuration validation.
//!
//! Enforces strategy parameter bounds and venue settings before any
//! evaluation runs. The evaluation core itself only guards against
//! degenerate arithmetic (zero periods, non-positive prices).

use crate::domain::error::CrossbotError;
use crate::domain::execution::ExecutionSettings;
use crate::domain::strategy::{trading_mode, TradingMode};
use crate::domain::venue::{data_source_kind, order_sink_kind, OrderSinkKind};
use crate::ports::config_port::ConfigPort;

pub const FAST_LENGTH_RANGE: (i64, i64) = (3, 200);
pub const SLOW_LENGTH_RANGE: (i64, i64) = (5, 400);
pub const MIN_CAPITAL: f64 = 10.0;
pub const RISK_PERCENT_RANGE: (f64, f64) = (0.1, 100.0);
pub const DEFAULT_CANDLE_LIMIT: usize = 200;

/// Lenient boolean parsing shared by config readers.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    validate_strategy_config(config)?;
    validate_market_data_config(config)?;
    validate_execution_config(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    validate_required("strategy", "symbol", config)?;
    validate_required("strategy", "timeframe", config)?;
    validate_int_range("fast_length", FAST_LENGTH_RANGE, config)?;
    validate_int_range("slow_length", SLOW_LENGTH_RANGE, config)?;
    validate_capital(config)?;
    validate_risk_percent(config)?;
    trading_mode(config)?;
    Ok(())
}

pub fn validate_market_data_config(config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    data_source_kind(config)?;
    validate_required("market_data", "path", config)?;
    candle_limit(config)?;
    Ok(())
}

/// `[market_data] limit`: a positive integer, [`DEFAULT_CANDLE_LIMIT`] when
/// absent.
pub fn candle_limit(config: &dyn ConfigPort) -> Result<usize, CrossbotError> {
    let Some(raw) = config.get_string("market_data", "limit") else {
        return Ok(DEFAULT_CANDLE_LIMIT);
    };
    match raw.trim().parse::<i64>() {
        Ok(limit) if limit >= 1 => usize::try_from(limit)
            .map_err(|_| CrossbotError::config_invalid("market_data", "limit", "limit is too large")),
        Ok(_) => Err(CrossbotError::config_invalid(
            "market_data",
            "limit",
            "limit must be at least 1",
        )),
        Err(_) => Err(CrossbotError::config_invalid(
            "market_data",
            "limit",
            "limit must be an integer",
        )),
    }
}

pub fn validate_execution_config(config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    let settings = ExecutionSettings::from_config(config)?;
    if order_sink_kind(config)? == OrderSinkKind::Journal {
        validate_required("execution", "journal_path", config)?;
    }
    if settings.mode == TradingMode::Live && settings.live_trading_enabled {
        tracing::warn!("live trading is enabled: orders will be transmitted");
    }
    Ok(())
}

fn validate_required(section: &str, key: &str, config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    if config.has_value(section, key) {
        Ok(())
    } else {
        Err(CrossbotError::config_missing(section, key))
    }
}

fn validate_int_range(
    key: &str,
    (min, max): (i64, i64),
    config: &dyn ConfigPort,
) -> Result<(), CrossbotError> {
    let raw = config
        .get_string("strategy", key)
        .ok_or_else(|| CrossbotError::config_missing("strategy", key))?;
    let value: i64 = raw.trim().parse().map_err(|_| {
        CrossbotError::config_invalid("strategy", key, format!("{} must be an integer", key))
    })?;
    if value < min || value > max {
        return Err(CrossbotError::config_invalid(
            "strategy",
            key,
            format!("{} must be between {} and {}", key, min, max),
        ));
    }
    Ok(())
}

fn validate_capital(config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    let value = config.get_double("strategy", "capital", 0.0);
    if value.is_nan() || value < MIN_CAPITAL {
        return Err(CrossbotError::config_invalid(
            "strategy",
            "capital",
            format!("capital must be at least {}", MIN_CAPITAL),
        ));
    }
    Ok(())
}

fn validate_risk_percent(config: &dyn ConfigPort) -> Result<(), CrossbotError> {
    let (min, max) = RISK_PERCENT_RANGE;
    let value = config.get_double("strategy", "risk_percent", 0.0);
    if value.is_nan() || value < min || value > max {
        return Err(CrossbotError::config_invalid(
            "strategy",
            "risk_percent",
            format!("risk_percent must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
