//! Order sink that only emits a log event for each order.

use crate::domain::error::CrossbotError;
use crate::domain::order::OrderIntent;
use crate::ports::order_sink_port::{OrderAck, OrderSinkPort};
use chrono::Utc;

#[derive(Debug, Default)]
pub struct LogSinkAdapter;

impl OrderSinkPort for LogSinkAdapter {
    fn name(&self) -> &'static str {
        "log"
    }

    fn submit(&self, symbol: &str, order: &OrderIntent) -> Result<OrderAck, CrossbotError> {
        let order_id = format!("log-{}", Utc::now().timestamp_millis());
        tracing::info!(
            order_id = %order_id,
            symbol,
            side = %order.side,
            order_type = %order.order_type,
            size = order.size,
            price = order.price,
            stop_loss = ?order.stop_loss,
            take_profit = ?order.take_profit,
            "order"
        );
        Ok(OrderAck { order_id })
    }
}
