//! Scrape-time collection pipeline.
//!
//! # Data Flow
//! ```text
//! GET /metrics
//!     → one ConfigStore snapshot
//!     → fetch capacity per plan, in order (failures counted and skipped)
//!     → private Prometheus recorder for this scrape
//!     → gauges per successful plan + process-wide totals
//!     → rendered exposition text
//! ```
//!
//! # Design Decisions
//! - The recorder is created at request entry and dropped at request exit;
//!   concurrent scrapes never share samples or label state
//! - A failed plan contributes no gauges for that scrape (absent, not zeroed)
//! - An empty plan list short-circuits to an empty body with no fetches

use std::sync::Arc;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::store::ConfigStore;
use crate::observability::metrics::{self as names, ExporterMetrics};
use crate::registration::{CapacityClient, PlanCapacity};

/// Assembles a fresh metrics snapshot for each scrape request.
#[derive(Clone)]
pub struct CollectionPipeline {
    store: Arc<ConfigStore>,
    http: reqwest::Client,
    metrics: Arc<ExporterMetrics>,
}

impl CollectionPipeline {
    pub fn new(
        store: Arc<ConfigStore>,
        http: reqwest::Client,
        metrics: Arc<ExporterMetrics>,
    ) -> Self {
        Self {
            store,
            http,
            metrics,
        }
    }

    /// Run one scrape and return the rendered metrics body.
    ///
    /// Reads the config snapshot exactly once; a reload landing mid-scrape is
    /// picked up by the next scrape.
    pub async fn collect(&self) -> String {
        let config = self.store.get();
        if config.plans.is_empty() {
            return String::new();
        }

        let client = CapacityClient::new(self.http.clone(), config.api.clone());
        let mut fetched: Vec<(String, PlanCapacity)> = Vec::with_capacity(config.plans.len());

        for plan in &config.plans {
            self.metrics.inc_requests();
            match client.plan_capacity(plan).await {
                Ok(capacity) => fetched.push((plan.clone(), capacity)),
                Err(e) => {
                    self.metrics.inc_errors();
                    tracing::warn!(plan = %plan, error = %e, "Failed to fetch plan capacity");
                }
            }
        }

        self.render(&fetched)
    }

    /// Record all samples for this scrape into a recorder private to it.
    ///
    /// Fetching is already done, so recording stays synchronous and the local
    /// recorder never spans an await point. Duplicate plan ids overwrite
    /// earlier samples, as configured order dictates.
    fn render(&self, fetched: &[(String, PlanCapacity)]) -> String {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            describe_gauge!(names::HIDDEN, names::HIDDEN_HELP);
            describe_gauge!(names::SUBSCRIBER_LIMIT, names::SUBSCRIBER_LIMIT_HELP);
            describe_gauge!(names::CAPACITY_CONSUMED, names::CAPACITY_CONSUMED_HELP);
            describe_gauge!(names::CAPACITY_REMAINING, names::CAPACITY_REMAINING_HELP);
            describe_counter!(names::EXPORTER_REQUESTS, names::EXPORTER_REQUESTS_HELP);
            describe_counter!(names::EXPORTER_ERRORS, names::EXPORTER_ERRORS_HELP);
            describe_gauge!(names::CONFIG_RELOAD_SUCCESS, names::CONFIG_RELOAD_SUCCESS_HELP);
            describe_gauge!(names::CONFIG_RELOAD_TIMESTAMP, names::CONFIG_RELOAD_TIMESTAMP_HELP);

            for (plan, capacity) in fetched {
                let hidden = if capacity.is_hidden { 1.0 } else { 0.0 };
                gauge!(names::HIDDEN, "plan" => plan.clone()).set(hidden);
                gauge!(names::SUBSCRIBER_LIMIT, "plan" => plan.clone())
                    .set(capacity.subscriber_limit as f64);
                gauge!(names::CAPACITY_CONSUMED, "plan" => plan.clone())
                    .set(capacity.capacity_consumed as f64);
                gauge!(names::CAPACITY_REMAINING, "plan" => plan.clone())
                    .set(capacity.capacity_remaining as f64);
            }

            counter!(names::EXPORTER_REQUESTS).absolute(self.metrics.requests());
            counter!(names::EXPORTER_ERRORS).absolute(self.metrics.errors());
            gauge!(names::CONFIG_RELOAD_SUCCESS).set(self.metrics.reload_successful() as f64);
            gauge!(names::CONFIG_RELOAD_TIMESTAMP).set(self.metrics.reload_timestamp_secs() as f64);
        });

        handle.render()
    }
}
