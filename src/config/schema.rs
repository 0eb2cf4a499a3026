//! Configuration schema definitions.
//!
//! The on-disk schema is strict: any field not listed here is a hard error,
//! so typos in a config file fail the load instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote registration API access.
    pub api: ApiConfig,

    /// Plan identifiers to fetch capacity for, in scrape order.
    ///
    /// Duplicates are kept as-is; a duplicate entry is fetched again and its
    /// samples overwrite the earlier ones within the same scrape.
    #[serde(default)]
    pub plans: Vec<String>,
}

/// Registration API endpoint and credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the registration API (e.g. "https://reg.example.com/api").
    pub url: String,

    /// API user, passed as the `authorization_username` query parameter.
    pub user: String,

    /// Bearer token for the Authorization header.
    pub token: String,
}
