//! Port traits: the narrow contracts between the domain and the outside world.

pub mod config_port;
pub mod market_data_port;
pub mod order_sink_port;
pub mod report_port;
