#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
pub use crossbot::domain::candle::Candle;
use crossbot::domain::error::CrossbotError;
use crossbot::domain::order::OrderIntent;
use crossbot::domain::strategy::{StrategyConfig, TradingMode};
use crossbot::ports::market_data_port::MarketDataPort;
use crossbot::ports::order_sink_port::{OrderAck, OrderSinkPort};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_candles(
        &self,
        symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, CrossbotError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CrossbotError::DataSource {
                reason: reason.clone(),
            });
        }
        let candles = self.data.get(symbol).cloned().unwrap_or_default();
        let skip = candles.len().saturating_sub(limit);
        Ok(candles.into_iter().skip(skip).collect())
    }
}

pub type Submitted = Rc<RefCell<Vec<(String, OrderIntent)>>>;

pub struct MockOrderSink {
    pub submitted: Submitted,
}

impl MockOrderSink {
    pub fn new() -> (Self, Submitted) {
        let submitted: Submitted = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                submitted: Rc::clone(&submitted),
            },
            submitted,
        )
    }
}

impl OrderSinkPort for MockOrderSink {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn submit(&self, symbol: &str, order: &OrderIntent) -> Result<OrderAck, CrossbotError> {
        let mut submitted = self.submitted.borrow_mut();
        submitted.push((symbol.to_string(), order.clone()));
        Ok(OrderAck {
            order_id: format!("mock-{}", submitted.len()),
        })
    }
}

/// Order sink whose venue rejects every order.
pub struct RejectingOrderSink;

impl OrderSinkPort for RejectingOrderSink {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn submit(&self, _symbol: &str, _order: &OrderIntent) -> Result<OrderAck, CrossbotError> {
        Err(CrossbotError::OrderSink {
            reason: "insufficient margin".into(),
        })
    }
}

pub fn ts(hour_offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(hour_offset)
}

pub fn make_candle(hour_offset: i64, close: f64) -> Candle {
    Candle {
        timestamp: ts(hour_offset),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000.0,
    }
}

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_candle(i as i64, close))
        .collect()
}

pub fn strategy_config(fast: usize, slow: usize) -> StrategyConfig {
    StrategyConfig {
        symbol: "BTC/USDT".into(),
        timeframe: "1h".into(),
        fast_length: fast,
        slow_length: slow,
        capital: 1000.0,
        risk_percent: 1.0,
        mode: TradingMode::Paper,
    }
}
