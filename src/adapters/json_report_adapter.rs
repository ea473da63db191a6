//! JSON evaluation report adapter.

use crate::domain::error::CrossbotError;
use crate::domain::record::EvaluationRecord;
use crate::ports::report_port::ReportPort;
use std::fs;

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(record: &EvaluationRecord) -> Result<String, CrossbotError> {
        Ok(serde_json::to_string_pretty(record)?)
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, record: &EvaluationRecord, output_path: &str) -> Result<(), CrossbotError> {
        let json = Self::render(record)?;
        fs::write(output_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::StrategyComputation;
    use crate::domain::signal::{Action, SignalKind};
    use crate::domain::strategy::{StrategyConfig, TradingMode};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_record() -> EvaluationRecord {
        let config = StrategyConfig {
            symbol: "BTC/USDT".into(),
            timeframe: "1h".into(),
            fast_length: 3,
            slow_length: 5,
            capital: 1000.0,
            risk_percent: 1.0,
            mode: TradingMode::Paper,
        };
        let computation = StrategyComputation {
            action: Action::Buy,
            signal: SignalKind::BullishCrossover,
            reason: "Bullish crossover detected".into(),
            latest_price: 100.0,
            position_size: 0.1,
            stop_loss: Some(95.0),
            take_profit: Some(103.0),
            fast_ma: vec![None, Some(99.0)],
            slow_ma: vec![None, Some(98.0)],
        };
        EvaluationRecord::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            &config,
            2,
            computation,
            None,
        )
    }

    #[test]
    fn writes_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record.json");
        JsonReportAdapter::new()
            .write(&sample_record(), path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"symbol\": \"BTC/USDT\""));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["action"], "buy");
        assert_eq!(value["take_profit"], 103.0);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let err = JsonReportAdapter::new()
            .write(&sample_record(), "/nonexistent/dir/record.json")
            .unwrap_err();
        assert!(matches!(err, CrossbotError::Io(_)));
    }
}
