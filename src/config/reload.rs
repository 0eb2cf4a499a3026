//! Reload coordination.
//!
//! Two independent triggers feed one coordinator task:
//! - SIGHUP: fire-and-forget, the outcome is only logged
//! - `POST /-/reload`: the caller blocks on a one-shot reply
//!
//! The coordinator services one request at a time, so two reloads never run
//! concurrently and the synchronous caller gets its result before the next
//! trigger is picked up. A failed load never touches the store.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::config::loader::{load_config, ConfigError};
use crate::config::store::ConfigStore;
use crate::observability::ExporterMetrics;

/// A pending reload, consumed exactly once by the coordinator.
pub struct ReloadRequest {
    /// Reply slot for a synchronous caller; `None` for the signal path.
    reply: Option<oneshot::Sender<Result<(), ConfigError>>>,
}

/// Error returned to a synchronous reload caller.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("reload coordinator is not running")]
    CoordinatorGone,
}

/// Cloneable handle for submitting reload requests.
#[derive(Clone)]
pub struct ReloadHandle {
    tx: mpsc::Sender<ReloadRequest>,
}

impl ReloadHandle {
    /// Request a reload and wait for its outcome.
    pub async fn reload(&self) -> Result<(), ReloadError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(ReloadRequest {
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| ReloadError::CoordinatorGone)?;

        match reply_rx.await {
            Ok(outcome) => outcome.map_err(ReloadError::Config),
            Err(_) => Err(ReloadError::CoordinatorGone),
        }
    }

    /// Request a reload without waiting; the coordinator logs the outcome.
    pub async fn trigger(&self) {
        if self
            .tx
            .send(ReloadRequest { reply: None })
            .await
            .is_err()
        {
            tracing::warn!("Reload trigger dropped: coordinator is not running");
        }
    }
}

/// Serializes all reload attempts against the config store.
pub struct ReloadCoordinator {
    store: Arc<ConfigStore>,
    config_path: PathBuf,
    metrics: Arc<ExporterMetrics>,
    rx: mpsc::Receiver<ReloadRequest>,
}

impl ReloadCoordinator {
    /// Create a coordinator and the handle its triggers share.
    pub fn new(
        store: Arc<ConfigStore>,
        config_path: PathBuf,
        metrics: Arc<ExporterMetrics>,
    ) -> (Self, ReloadHandle) {
        let (tx, rx) = mpsc::channel(4);
        (
            Self {
                store,
                config_path,
                metrics,
                rx,
            },
            ReloadHandle { tx },
        )
    }

    /// Run until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let outcome = self.reload_once();
            match &outcome {
                Ok(()) => tracing::info!(path = ?self.config_path, "Reloaded config file"),
                Err(e) => {
                    tracing::error!(path = ?self.config_path, error = %e,
                        "Error reloading config, keeping current configuration")
                }
            }
            if let Some(reply) = request.reply {
                let _ = reply.send(outcome);
            }
        }
    }

    /// One load-validate-swap attempt. Parsing happens entirely before the
    /// swap, so a failure leaves the active config in force.
    fn reload_once(&self) -> Result<(), ConfigError> {
        match load_config(&self.config_path) {
            Ok(config) => {
                self.store.replace(config);
                self.metrics.record_reload(true);
                Ok(())
            }
            Err(e) => {
                self.metrics.record_reload(false);
                Err(e)
            }
        }
    }
}
