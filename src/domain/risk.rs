//! Position sizing and stop-loss / take-profit bounds.
//!
//! Size is the capital put at risk divided by the latest price. Bounds come
//! from the extremes of a trailing candle window: below the recent low for a
//! long, above the recent high for a short. A non-positive price sizes to
//! zero and yields no bounds; non-finite bounds are dropped.

use crate::domain::candle::{highest_high, lowest_low, Candle};
use crate::domain::signal::Action;

pub const SIZE_DECIMALS: u32 = 6;
pub const PRICE_DECIMALS: u32 = 2;

const LONG_STOP_FACTOR: f64 = 0.99;
const LONG_TARGET_FACTOR: f64 = 1.03;
const SHORT_STOP_FACTOR: f64 = 1.01;
const SHORT_TARGET_FACTOR: f64 = 0.97;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskPlan {
    pub position_size: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `risk_percent` as a fraction of capital, clamped to `[0, 1]`.
pub fn risk_fraction(risk_percent: f64) -> f64 {
    if risk_percent.is_nan() {
        return 0.0;
    }
    (risk_percent / 100.0).clamp(0.0, 1.0)
}

pub fn position_size(capital: f64, risk_percent: f64, latest_price: f64) -> f64 {
    if latest_price.is_nan() || latest_price <= 0.0 {
        return 0.0;
    }
    let capital_at_risk = capital * risk_fraction(risk_percent);
    let size = round_to(capital_at_risk / latest_price, SIZE_DECIMALS);
    finite(size).unwrap_or(0.0)
}

/// Stop-loss and take-profit for `action`; `(None, None)` for `Hold`.
pub fn risk_bounds(action: Action, latest_price: f64, window: &[Candle]) -> (Option<f64>, Option<f64>) {
    if latest_price.is_nan() || latest_price <= 0.0 {
        return (None, None);
    }

    let (stop, target) = match action {
        Action::Buy => (
            lowest_low(window) * LONG_STOP_FACTOR,
            latest_price * LONG_TARGET_FACTOR,
        ),
        Action::Sell => (
            highest_high(window) * SHORT_STOP_FACTOR,
            latest_price * SHORT_TARGET_FACTOR,
        ),
        Action::Hold => return (None, None),
    };

    (
        finite(round_to(stop, PRICE_DECIMALS)),
        finite(round_to(target, PRICE_DECIMALS)),
    )
}

pub fn plan(
    action: Action,
    capital: f64,
    risk_percent: f64,
    latest_price: f64,
    window: &[Candle],
) -> RiskPlan {
    let (stop_loss, take_profit) = risk_bounds(action, latest_price, window);
    RiskPlan {
        position_size: position_size(capital, risk_percent, latest_price),
        stop_loss,
        take_profit,
    }
}
