//! Domain error types.

/// Top-level error type for crossbot.
#[derive(Debug, thiserror::Error)]
pub enum CrossbotError {
    #[error("invalid moving average period {period}: must be positive")]
    InvalidPeriod { period: i64 },

    #[error("no candles for {symbol} on {timeframe}")]
    NoData { symbol: String, timeframe: String },

    #[error("market data error: {reason}")]
    DataSource { reason: String },

    #[error("order sink error: {reason}")]
    OrderSink { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CrossbotError {
    pub(crate) fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        CrossbotError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Failures confined to a single evaluation cycle: the feed was
    /// unavailable or empty, or the venue rejected the order. A later cycle
    /// may succeed.
    pub fn is_cycle_failure(&self) -> bool {
        matches!(
            self,
            CrossbotError::DataSource { .. }
                | CrossbotError::NoData { .. }
                | CrossbotError::OrderSink { .. }
        )
    }

    pub(crate) fn config_missing(section: &str, key: &str) -> Self {
        CrossbotError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }
    }
}

impl From<&CrossbotError> for std::process::ExitCode {
    fn from(err: &CrossbotError) -> Self {
        let code: u8 = match err {
            CrossbotError::Io(_) | CrossbotError::Json(_) => 1,
            CrossbotError::ConfigParse { .. }
            | CrossbotError::ConfigMissing { .. }
            | CrossbotError::ConfigInvalid { .. } => 2,
            CrossbotError::DataSource { .. } => 3,
            CrossbotError::OrderSink { .. } => 4,
            CrossbotError::InvalidPeriod { .. } | CrossbotError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
