//! Observability subsystem.
//!
//! Logging is `tracing` initialized in `main`; metric names and the
//! process-wide counters live in `metrics.rs`. Per-scrape samples are
//! recorded by the collector into a recorder private to each request.

pub mod metrics;

pub use metrics::ExporterMetrics;
