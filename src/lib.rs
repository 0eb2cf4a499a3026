//! Online-registration capacity exporter.
//!
//! Exposes per-plan subscription capacity from a remote registration API as
//! Prometheus metrics. Each scrape re-fetches every configured plan; nothing
//! is cached between scrapes.

// Core subsystems
pub mod collector;
pub mod config;
pub mod http;
pub mod registration;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::Config;
pub use config::store::ConfigStore;
pub use http::HttpServer;
