//! CSV file market data adapter.
//!
//! One file per (symbol, timeframe): `<base>/<SYMBOL>_<timeframe>.csv` with a
//! `timestamp,open,high,low,close,volume` header. Timestamps are RFC 3339 or
//! integer epoch milliseconds. Symbol separators (`/`, `:`) become `_` in the
//! file name.

use crate::domain::candle::Candle;
use crate::domain::error::CrossbotError;
use crate::ports::market_data_port::MarketDataPort;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn csv_path(&self, symbol: &str, timeframe: &str) -> PathBuf {
        let symbol = symbol.replace(['/', ':'], "_");
        self.base_path.join(format!("{}_{}.csv", symbol, timeframe))
    }
}

fn data_error(reason: impl Into<String>) -> CrossbotError {
    CrossbotError::DataSource {
        reason: reason.into(),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CrossbotError> {
    let raw = raw.trim();
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| data_error(format!("timestamp out of range: {}", raw)));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| data_error(format!("invalid timestamp '{}': {}", raw, e)))
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, CrossbotError> {
    record
        .get(index)
        .ok_or_else(|| data_error(format!("missing {} column", name)))?
        .trim()
        .parse()
        .map_err(|e| data_error(format!("invalid {} value: {}", name, e)))
}

impl MarketDataPort for CsvAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, CrossbotError> {
        let path = self.csv_path(symbol, timeframe);
        let content = fs::read_to_string(&path)
            .map_err(|e| data_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {}", e)))?;

            let timestamp = parse_timestamp(
                record
                    .get(0)
                    .ok_or_else(|| data_error("missing timestamp column"))?,
            )?;

            candles.push(Candle {
                timestamp,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        let keep_from = candles.len().saturating_sub(limit);
        candles.drain(..keep_from);
        tracing::debug!(symbol, timeframe, count = candles.len(), path = %path.display(), "candles loaded");
        Ok(candles)
    }
}
