//! Command implementations for the CLI
//!
//! - quote: compute an itemized price
//! - rate: look up a single exchange rate
//! - config: configuration display and validation

pub mod config;
pub mod quote;
pub mod rate;
