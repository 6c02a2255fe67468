//! Core types for the aggregation engines.

mod bucket;
mod config;

pub use bucket::TenorBucket;
pub use config::AnalyticsConfig;
