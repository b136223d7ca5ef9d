//! In-memory request statistics.
//!
//! Counters live for the lifetime of the process and are lost on restart.

pub mod tracker;

pub use tracker::{format_uptime, requests_per_minute, StatsSnapshot, StatsTracker};
