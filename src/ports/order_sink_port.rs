//! Order transmission port trait.

use crate::domain::error::CrossbotError;
use crate::domain::order::OrderIntent;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by a venue after accepting an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
}

pub trait OrderSinkPort {
    fn name(&self) -> &'static str;

    fn submit(&self, symbol: &str, order: &OrderIntent) -> Result<OrderAck, CrossbotError>;
}
