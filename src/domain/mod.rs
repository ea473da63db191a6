//! Core domain types and logic.

pub mod candle;
pub mod config_validation;
pub mod error;
pub mod evaluation;
pub mod execution;
pub mod indicator;
pub mod order;
pub mod record;
pub mod risk;
pub mod signal;
pub mod strategy;
pub mod venue;
