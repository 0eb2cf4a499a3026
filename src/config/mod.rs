//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, unknown fields rejected)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//!     → store.rs (atomic swap of Arc<Config>, shared with all scrapes)
//!
//! On reload trigger (SIGHUP or POST /-/reload):
//!     reload.rs coordinator loads + validates
//!     → on success: store.replace (whole-object swap)
//!     → on failure: previous config stays in force
//! ```
//!
//! # Design Decisions
//! - Config is immutable once published; changes require full reload
//! - Validation separates syntactic (serde) from semantic checks
//! - Reloads are serialized through a single coordinator task

pub mod loader;
pub mod reload;
pub mod schema;
pub mod store;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use reload::{ReloadCoordinator, ReloadHandle};
pub use schema::{ApiConfig, Config};
pub use store::ConfigStore;
