//! Candidate order construction.

use crate::domain::evaluation::StrategyComputation;
use crate::domain::signal::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub size: f64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
}

/// The order an evaluation proposes, if any.
///
/// Nothing is proposed for `Hold` or when sizing came out at zero (for
/// example a non-positive latest price).
pub fn build_order(computation: &StrategyComputation) -> Option<OrderIntent> {
    let side = match computation.action {
        Action::Buy => OrderSide::Buy,
        Action::Sell => OrderSide::Sell,
        Action::Hold => return None,
    };

    if computation.position_size.is_nan() || computation.position_size <= 0.0 {
        return None;
    }

    Some(OrderIntent {
        side,
        order_type: OrderType::Market,
        size: computation.position_size,
        price: computation.latest_price,
        stop_loss: computation.stop_loss,
        take_profit: computation.take_profit,
    })
}
