//! Flat, serializable output record for one evaluation cycle.

use crate::domain::evaluation::StrategyComputation;
use crate::domain::execution::ExecutionOutcome;
use crate::domain::order::OrderIntent;
use crate::domain::strategy::{StrategyConfig, TradingMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub evaluated_at: DateTime<Utc>,
    pub symbol: String,
    pub timeframe: String,
    pub mode: TradingMode,
    pub candles_used: usize,
    #[serde(flatten)]
    pub computation: StrategyComputation,
    pub order: Option<OrderIntent>,
    pub execution: Option<ExecutionOutcome>,
}

impl EvaluationRecord {
    pub fn new(
        evaluated_at: DateTime<Utc>,
        config: &StrategyConfig,
        candles_used: usize,
        computation: StrategyComputation,
        order: Option<OrderIntent>,
    ) -> Self {
        Self {
            evaluated_at,
            symbol: config.symbol.clone(),
            timeframe: config.timeframe.clone(),
            mode: config.mode,
            candles_used,
            computation,
            order,
            execution: None,
        }
    }

    pub fn with_execution(mut self, outcome: ExecutionOutcome) -> Self {
        self.execution = Some(outcome);
        self
    }
}
