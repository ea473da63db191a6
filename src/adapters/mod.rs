//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod journal_adapter;
pub mod json_report_adapter;
pub mod log_sink_adapter;
