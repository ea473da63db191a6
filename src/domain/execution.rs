//! Execution boundary: decides whether an order intent is transmitted.
//!
//! Two independent gates must both pass before anything reaches a venue:
//! the configured [`TradingMode`] must be `Live`, and the separately
//! configured `live_trading_enabled` switch must be `true`. Both are fixed
//! when [`ExecutionSettings`] is built at startup.

use crate::domain::config_validation::parse_bool;
use crate::domain::error::CrossbotError;
use crate::domain::order::OrderIntent;
use crate::domain::strategy::{trading_mode, TradingMode};
use crate::ports::config_port::ConfigPort;
use crate::ports::order_sink_port::OrderSinkPort;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSettings {
    pub mode: TradingMode,
    pub live_trading_enabled: bool,
}

impl ExecutionSettings {
    pub fn new(mode: TradingMode, live_trading_enabled: bool) -> Self {
        Self {
            mode,
            live_trading_enabled,
        }
    }

    /// Read `[strategy] mode` and the required `[execution]
    /// live_trading_enabled` switch.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, CrossbotError> {
        let mode = trading_mode(config)?;

        let raw = config
            .get_string("execution", "live_trading_enabled")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| CrossbotError::config_missing("execution", "live_trading_enabled"))?;
        let live_trading_enabled = parse_bool(&raw).ok_or_else(|| {
            CrossbotError::config_invalid(
                "execution",
                "live_trading_enabled",
                format!("expected true or false, got '{}'", raw.trim()),
            )
        })?;

        Ok(Self::new(mode, live_trading_enabled))
    }

    /// Why an order would not be transmitted under these settings, if it
    /// would not.
    pub fn skip_reason(&self) -> Option<&'static str> {
        match (self.mode, self.live_trading_enabled) {
            (TradingMode::Paper, _) => Some("paper mode: order recorded but not transmitted"),
            (TradingMode::Live, false) => {
                Some("live mode but live_trading_enabled is false: order recorded but not transmitted")
            }
            (TradingMode::Live, true) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    NoOrder,
    Skipped { reason: String },
    Submitted { sink: String, order_id: String },
}

pub struct ExecutionGate {
    settings: ExecutionSettings,
    sink: Box<dyn OrderSinkPort>,
}

impl ExecutionGate {
    pub fn new(settings: ExecutionSettings, sink: Box<dyn OrderSinkPort>) -> Self {
        Self { settings, sink }
    }

    pub fn dispatch(
        &self,
        symbol: &str,
        order: Option<&OrderIntent>,
    ) -> Result<ExecutionOutcome, CrossbotError> {
        let Some(order) = order else {
            return Ok(ExecutionOutcome::NoOrder);
        };

        if let Some(reason) = self.settings.skip_reason() {
            tracing::info!(symbol, side = %order.side, size = order.size, reason, "order skipped");
            return Ok(ExecutionOutcome::Skipped {
                reason: reason.to_string(),
            });
        }

        let ack = self.sink.submit(symbol, order)?;
        tracing::info!(
            symbol,
            side = %order.side,
            size = order.size,
            sink = self.sink.name(),
            order_id = %ack.order_id,
            "order submitted"
        );
        Ok(ExecutionOutcome::Submitted {
            sink: self.sink.name().to_string(),
            order_id: ack.order_id,
        })
    }
}
