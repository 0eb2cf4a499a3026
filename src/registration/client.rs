//! HTTP client for the registration capacity API.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::schema::ApiConfig;

/// Per-plan fetch timeout. Deliberately shorter than any plausible scrape
/// interval so one stuck upstream call cannot stall a scrape indefinitely.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity figures for one plan.
///
/// Decoded leniently: the upstream object carries more fields (id, name,
/// display_name, ...) that the exporter does not use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanCapacity {
    pub is_hidden: bool,
    pub subscriber_limit: i64,
    pub capacity_consumed: i64,
    pub capacity_remaining: i64,
}

/// Response envelope: `{ "plan": { ... } }`.
#[derive(Debug, Deserialize)]
struct CapacityEnvelope {
    plan: PlanCapacity,
}

/// A single failed capacity fetch. One attempt per scrape per plan, no
/// retries; the collector counts the error and moves on.
#[derive(Debug, thiserror::Error)]
pub enum CapacityError {
    #[error("invalid capacity URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("capacity request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Stateless-per-call adapter for the registration API.
///
/// Holds the connection-pooled HTTP client plus the API coordinates from one
/// config snapshot; each scrape constructs a fresh instance from its own
/// snapshot.
#[derive(Clone)]
pub struct CapacityClient {
    http: reqwest::Client,
    api: ApiConfig,
}

impl CapacityClient {
    pub fn new(http: reqwest::Client, api: ApiConfig) -> Self {
        Self { http, api }
    }

    /// Build the shared HTTP client with the fixed fetch timeout applied.
    pub fn http_client() -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()
    }

    /// Fetch capacity figures for one plan.
    ///
    /// `GET {url}/plans/{plan}/capacity?authorization_username={user}` with a
    /// bearer-token Authorization header. The body is decoded regardless of
    /// HTTP status; an error body that is not a capacity envelope surfaces as
    /// a decode error.
    pub async fn plan_capacity(&self, plan: &str) -> Result<PlanCapacity, CapacityError> {
        let url = Url::parse(&format!("{}/plans/{}/capacity", self.api.url, plan))?;

        let envelope: CapacityEnvelope = self
            .http
            .get(url)
            .query(&[("authorization_username", self.api.user.as_str())])
            .bearer_auth(&self.api.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .json()
            .await?;

        Ok(envelope.plan)
    }
}
