//! Configuration validation.
//!
//! Semantic checks that serde cannot express, run before a config is
//! accepted into the store.

use url::Url;

use crate::config::schema::Config;

/// A semantic error in an otherwise well-formed config file.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("api.url must not be empty")]
    EmptyApiUrl,

    #[error("api.url is not a valid URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &Config) -> Result<(), ValidationError> {
    if config.api.url.is_empty() {
        return Err(ValidationError::EmptyApiUrl);
    }
    Url::parse(&config.api.url)?;
    Ok(())
}
