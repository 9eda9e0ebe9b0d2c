//! Rollup statistics module - per-source counters and the daily trend.

mod stats_model;
mod stats_service;

pub use stats_model::*;
pub use stats_service::*;

#[cfg(test)]
mod stats_service_tests;
