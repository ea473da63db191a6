//! Single-pass strategy evaluation.
//!
//! `(candles, config) -> StrategyComputation`, with no state carried between
//! calls:
//! 1. Reject an empty candle sequence.
//! 2. Fast and slow SMA over closes.
//! 3. Classify the latest fast/slow relationship.
//! 4. Size the position and derive stop/take bounds over the trailing
//!    `slow_length` candles.

use crate::domain::candle::{closes, trailing_window, Candle};
use crate::domain::error::CrossbotError;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::MaSeries;
use crate::domain::risk;
use crate::domain::signal::{evaluate_signal, Action, SignalKind};
use crate::domain::strategy::StrategyConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComputation {
    pub action: Action,
    pub signal: SignalKind,
    pub reason: String,
    pub latest_price: f64,
    pub position_size: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub fast_ma: MaSeries,
    pub slow_ma: MaSeries,
}

pub fn evaluate(
    candles: &[Candle],
    config: &StrategyConfig,
) -> Result<StrategyComputation, CrossbotError> {
    let Some(latest) = candles.last() else {
        return Err(CrossbotError::NoData {
            symbol: config.symbol.clone(),
            timeframe: config.timeframe.clone(),
        });
    };

    let close_prices = closes(candles);
    let fast_ma = calculate_sma(&close_prices, config.fast_length)?;
    let slow_ma = calculate_sma(&close_prices, config.slow_length)?;

    let signal = evaluate_signal(&fast_ma, &slow_ma, &close_prices);
    let latest_price = latest.close;
    let window = trailing_window(candles, config.slow_length);
    let plan = risk::plan(
        signal.action,
        config.capital,
        config.risk_percent,
        latest_price,
        window,
    );

    Ok(StrategyComputation {
        action: signal.action,
        signal: signal.kind,
        reason: signal.reason,
        latest_price,
        position_size: plan.position_size,
        stop_loss: plan.stop_loss,
        take_profit: plan.take_profit,
        fast_ma,
        slow_ma,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::TradingMode;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).unwrap(),
                open: close,
                high: close * 1.1,
                low: close * 0.9,
                close,
                volume: 100.0,
            })
            .collect()
    }

    fn config(fast: usize, slow: usize) -> StrategyConfig {
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

    #[test]
    fn empty_candles_is_no_data() {
        let err = evaluate(&[], &config(3, 5)).unwrap_err();
        assert!(matches!(err, CrossbotError::NoData { ref symbol, .. } if symbol == "BTC/USDT"));
    }

    #[test]
    fn zero_period_aborts() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
        let err = evaluate(&candles, &config(0, 5)).unwrap_err();
        assert!(matches!(err, CrossbotError::InvalidPeriod { period: 0 }));
        let err = evaluate(&candles, &config(3, 0)).unwrap_err();
        assert!(matches!(err, CrossbotError::InvalidPeriod { period: 0 }));
    }

    #[test]
    fn ma_series_aligned_with_candles() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let result = evaluate(&candles, &config(3, 5)).unwrap();
        assert_eq!(result.fast_ma.len(), candles.len());
        assert_eq!(result.slow_ma.len(), candles.len());
    }

    #[test]
    fn rising_closes_continuation_buy() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = evaluate(&candles, &config(3, 5)).unwrap();

        assert_relative_eq!(result.fast_ma[4].unwrap(), 4.0);
        assert_relative_eq!(result.slow_ma[4].unwrap(), 3.0);
        assert!(result.slow_ma[3].is_none());
        assert_eq!(result.action, Action::Buy);
        assert_eq!(result.signal, SignalKind::BullishContinuation);
        assert!(!result.reason.to_lowercase().contains("crossover detected"));
    }

    #[test]
    fn buy_sizing_and_bounds() {
        let candles = candles_from_closes(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let result = evaluate(&candles, &config(3, 5)).unwrap();

        assert_eq!(result.action, Action::Buy);
        // 1000 * 1% / 50
        assert_relative_eq!(result.position_size, 0.2);
        assert_relative_eq!(result.latest_price, 50.0);
        // lowest low 9.0 * 0.99, latest 50 * 1.03
        assert_eq!(result.stop_loss, Some(8.91));
        assert_eq!(result.take_profit, Some(51.5));
    }

    #[test]
    fn not_enough_candles_holds() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0]);
        let result = evaluate(&candles, &config(3, 5)).unwrap();
        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.stop_loss, None);
        assert_eq!(result.take_profit, None);
        // Sizing is independent of the action.
        assert_relative_eq!(result.position_size, 2.5);
    }

    #[test]
    fn non_positive_latest_price_zero_size() {
        let candles = candles_from_closes(&[5.0, 6.0, 7.0, 8.0, 0.0]);
        let result = evaluate(&candles, &config(2, 3)).unwrap();
        assert_eq!(result.position_size, 0.0);
        assert_eq!(result.stop_loss, None);
        assert_eq!(result.take_profit, None);
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let candles = candles_from_closes(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        let cfg = config(2, 4);
        assert_eq!(evaluate(&candles, &cfg).unwrap(), evaluate(&candles, &cfg).unwrap());
    }
}
