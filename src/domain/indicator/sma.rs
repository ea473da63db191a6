//! Simple Moving Average.
//!
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n
//! Warmup: first (n-1) entries are `None`.
//!
//! Each window is summed front to back, so values are reproducible
//! bit-for-bit against a naive windowed summation.

use crate::domain::candle::Candle;
use crate::domain::error::CrossbotError;
use crate::domain::indicator::MaSeries;

pub fn calculate_sma(values: &[f64], period: usize) -> Result<MaSeries, CrossbotError> {
    if period == 0 {
        return Err(CrossbotError::InvalidPeriod { period: 0 });
    }

    let divisor = period as f64;
    let series = (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                let window = &values[i + 1 - period..=i];
                Some(window.iter().sum::<f64>() / divisor)
            }
        })
        .collect();

    Ok(series)
}

/// SMA over candle closes.
pub fn calculate_close_sma(candles: &[Candle], period: usize) -> Result<MaSeries, CrossbotError> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    calculate_sma(&closes, period)
}

/// Convert a signed period (as read from configuration) to a window length.
pub fn period_from_i64(period: i64) -> Result<usize, CrossbotError> {
    match usize::try_from(period) {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(CrossbotError::InvalidPeriod { period }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn sma_warmup() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3).unwrap();
        assert_eq!(series.len(), 5);
        assert!(series[0].is_none());
        assert!(series[1].is_none());
        assert!(series[2].is_some());
        assert!(series[4].is_some());
    }

    #[test]
    fn sma_known_values() {
        let series = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3).unwrap();
        assert_relative_eq!(series[2].unwrap(), 20.0);
        assert_relative_eq!(series[3].unwrap(), 30.0);
        assert_relative_eq!(series[4].unwrap(), 40.0);
    }

    #[test]
    fn sma_period_1_is_identity() {
        let values = [3.5, 7.25, 1.0];
        let series = calculate_sma(&values, 1).unwrap();
        for (v, s) in values.iter().zip(&series) {
            assert_eq!(Some(*v), *s);
        }
    }

    #[test]
    fn sma_period_longer_than_input() {
        let series = calculate_sma(&[1.0, 2.0], 5).unwrap();
        assert_eq!(series, vec![None, None]);
    }

    #[test]
    fn sma_empty_input() {
        let series = calculate_sma(&[], 3).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn sma_period_0() {
        let err = calculate_sma(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, CrossbotError::InvalidPeriod { period: 0 }));
    }

    #[test]
    fn close_sma_matches_closes() {
        use chrono::{TimeZone, Utc};
        let candles: Vec<Candle> = (1..=5)
            .map(|i| Candle {
                timestamp: Utc.timestamp_opt(i * 60, 0).unwrap(),
                open: 0.0,
                high: 0.0,
                low: 0.0,
                close: i as f64,
                volume: 0.0,
            })
            .collect();
        let series = calculate_close_sma(&candles, 5).unwrap();
        assert_relative_eq!(series[4].unwrap(), 3.0);
    }

    #[test]
    fn period_conversion() {
        assert_eq!(period_from_i64(9).unwrap(), 9);
        assert!(matches!(
            period_from_i64(0),
            Err(CrossbotError::InvalidPeriod { period: 0 })
        ));
        assert!(matches!(
            period_from_i64(-4),
            Err(CrossbotError::InvalidPeriod { period: -4 })
        ));
    }

    proptest! {
        #[test]
        fn sma_is_windowed_mean(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..80),
            period in 1usize..40,
        ) {
            prop_assume!(period <= values.len());
            let series = calculate_sma(&values, period).unwrap();
            prop_assert_eq!(series.len(), values.len());
            for (i, entry) in series.iter().enumerate() {
                if i + 1 < period {
                    prop_assert!(entry.is_none());
                } else {
                    let mut sum = 0.0;
                    for v in &values[i + 1 - period..=i] {
                        sum += *v;
                    }
                    prop_assert_eq!(*entry, Some(sum / period as f64));
                }
            }
        }

        #[test]
        fn non_positive_period_always_rejected(period in i64::MIN..=0) {
            prop_assert!(
                matches!(period_from_i64(period), Err(CrossbotError::InvalidPeriod { .. })),
                "period {} accepted",
                period
            );
        }
    }
}
