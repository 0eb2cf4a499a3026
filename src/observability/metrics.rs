//! Metric names and process-wide exporter state.
//!
//! # Metrics
//! - `onlinereg_hidden{plan}` (gauge): 1 if the plan is hidden
//! - `onlinereg_subscriber_limit{plan}` (gauge)
//! - `onlinereg_capacity_consumed{plan}` (gauge)
//! - `onlinereg_capacity_remaining{plan}` (gauge)
//! - `onlinereg_exporter_requests` (counter): capacity requests made, all scrapes
//! - `onlinereg_exporter_errors` (counter): failed capacity requests, all scrapes
//! - config reload status gauges (success flag + timestamp)
//!
//! The per-plan gauges are scrape-local; the counters and reload gauges are
//! the only process-wide mutable state and are plain atomics, written into
//! each scrape's private recorder as absolute values.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const HIDDEN: &str = "onlinereg_hidden";
pub const SUBSCRIBER_LIMIT: &str = "onlinereg_subscriber_limit";
pub const CAPACITY_CONSUMED: &str = "onlinereg_capacity_consumed";
pub const CAPACITY_REMAINING: &str = "onlinereg_capacity_remaining";
pub const EXPORTER_REQUESTS: &str = "onlinereg_exporter_requests";
pub const EXPORTER_ERRORS: &str = "onlinereg_exporter_errors";
pub const CONFIG_RELOAD_SUCCESS: &str =
    "onlineregistration_exporter_config_last_reload_successful";
pub const CONFIG_RELOAD_TIMESTAMP: &str =
    "onlineregistration_exporter_config_last_reload_success_timestamp_seconds";

pub const HIDDEN_HELP: &str = "Indicates if a plan is hidden";
pub const SUBSCRIBER_LIMIT_HELP: &str = "Subscriber limit for a plan";
pub const CAPACITY_CONSUMED_HELP: &str = "Capacity consumed for a plan";
pub const CAPACITY_REMAINING_HELP: &str = "Capacity remaining for a plan";
pub const EXPORTER_REQUESTS_HELP: &str = "Number of requests made to the exporter";
pub const EXPORTER_ERRORS_HELP: &str = "Number of errors getting plan capacity";
pub const CONFIG_RELOAD_SUCCESS_HELP: &str =
    "Online-registration exporter config loaded successfully.";
pub const CONFIG_RELOAD_TIMESTAMP_HELP: &str =
    "Timestamp of the last successful configuration reload.";

/// Process-wide exporter totals, shared across all scrapes.
///
/// Increments are lock-free; readers take point-in-time snapshots when
/// rendering a scrape.
#[derive(Debug, Default)]
pub struct ExporterMetrics {
    requests: AtomicU64,
    errors: AtomicU64,
    reload_successful: AtomicU64,
    reload_timestamp_secs: AtomicU64,
}

impl ExporterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one capacity request (attempted, success or not).
    pub fn inc_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one failed capacity request.
    pub fn inc_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Record the outcome of a config load or reload attempt.
    ///
    /// The timestamp only advances on success, matching the metric name.
    pub fn record_reload(&self, success: bool) {
        if success {
            self.reload_successful.store(1, Ordering::Relaxed);
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            self.reload_timestamp_secs.store(now, Ordering::Relaxed);
        } else {
            self.reload_successful.store(0, Ordering::Relaxed);
        }
    }

    pub fn reload_successful(&self) -> u64 {
        self.reload_successful.load(Ordering::Relaxed)
    }

    pub fn reload_timestamp_secs(&self) -> u64 {
        self.reload_timestamp_secs.load(Ordering::Relaxed)
    }
}
