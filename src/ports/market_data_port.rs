//! Market data source port trait.

use crate::domain::candle::Candle;
use crate::domain::error::CrossbotError;

pub trait MarketDataPort {
    /// Up to `limit` most recent candles for `symbol` on `timeframe`, oldest
    /// first.
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, CrossbotError>;
}
