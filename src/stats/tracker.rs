//! Request counter and uptime anchor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::iso_timestamp;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Point-in-time view of request statistics.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatsSnapshot {
    /// Requests received since start, including the one reading this.
    pub total_requests: u64,
    /// Milliseconds since start.
    pub uptime_ms: u64,
    /// Uptime as `1h 2m 5s`, `2m 5s` or `5s`.
    pub uptime_readable: String,
    /// Mean requests per minute since start; 0 when no time has elapsed.
    pub average_requests_per_minute: f64,
    /// ISO-8601 start time.
    pub server_start: String,
}

/// Process-lifetime request statistics.
///
/// Shared behind an `Arc`; the counter is an atomic so concurrent
/// increments are never lost.
#[derive(Debug)]
pub struct StatsTracker {
    request_count: AtomicU64,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl StatsTracker {
    /// Start tracking from now with a zero count.
    pub fn new() -> Self {
        Self {
            request_count: AtomicU64::new(0),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Count one inbound request. Returns the new total.
    pub fn record_request(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Requests counted so far.
    pub fn total_requests(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Time since tracking started.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Wall-clock start time.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Read the current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        let total_requests = self.total_requests();
        let uptime_ms = u64::try_from(self.uptime().as_millis()).unwrap_or(u64::MAX);

        StatsSnapshot {
            total_requests,
            uptime_ms,
            uptime_readable: format_uptime(uptime_ms),
            average_requests_per_minute: requests_per_minute(total_requests, uptime_ms),
            server_start: iso_timestamp(self.started_at),
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Format milliseconds as `{h}h {m}m {s}s`, `{m}m {s}s` or `{s}s`.
pub fn format_uptime(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// Average request rate; 0.0 when `uptime_ms` is zero.
pub fn requests_per_minute(total_requests: u64, uptime_ms: u64) -> f64 {
    if uptime_ms == 0 {
        return 0.0;
    }
    total_requests as f64 / (uptime_ms as f64 / MS_PER_MINUTE)
}
