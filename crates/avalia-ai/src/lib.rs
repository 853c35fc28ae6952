//! Property valuation form model and price estimation plumbing.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod valuation;
