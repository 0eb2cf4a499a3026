//! Online-registration capacity exporter.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────────────┐
//!                  │                EXPORTER PROCESS                    │
//!                  │                                                    │
//!   GET /metrics   │  ┌────────┐   ┌───────────┐   ┌────────────────┐  │
//!   ───────────────┼─▶│  http  │──▶│ collector │──▶│  registration  │──┼──▶ capacity API
//!                  │  │ server │   │ pipeline  │   │     client     │  │    (N fetches,
//!   metrics body   │  └────────┘   └─────┬─────┘   └────────────────┘  │     one per plan)
//!   ◀──────────────┼────────────────────┐│                             │
//!                  │                    ▼▼                             │
//!                  │              ┌───────────┐                        │
//!   POST /-/reload │  ┌────────┐  │  config   │   ┌────────────────┐  │
//!   ───────────────┼─▶│ reload │─▶│   store   │◀──│     reload     │◀─┼──── SIGHUP
//!                  │  │handler │  │ (ArcSwap) │   │  coordinator   │  │
//!                  │  └────────┘  └───────────┘   └────────────────┘  │
//!                  └────────────────────────────────────────────────────┘
//! ```
//!
//! Each scrape reads one config snapshot, fetches every configured plan and
//! renders a metrics snapshot private to that request. Reloads from both
//! triggers are serialized through one coordinator task; a failed reload
//! keeps the previous configuration in force.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onlinereg_exporter::collector::CollectionPipeline;
use onlinereg_exporter::config::{load_config, ConfigStore, ReloadCoordinator};
use onlinereg_exporter::http::HttpServer;
use onlinereg_exporter::lifecycle::spawn_reload_on_sighup;
use onlinereg_exporter::observability::ExporterMetrics;
use onlinereg_exporter::registration::CapacityClient;

#[derive(Parser)]
#[command(name = "onlinereg-exporter", version)]
#[command(about = "Prometheus exporter for online-registration plan capacity", long_about = None)]
struct Args {
    /// Online-registration exporter configuration file.
    #[arg(long = "config.file", default_value = "config.toml")]
    config_file: PathBuf,

    /// The address to listen on for HTTP requests.
    #[arg(long = "web.listen-address", default_value = "0.0.0.0:9115")]
    listen_address: String,

    /// Validate the config file and exit.
    #[arg(long = "config.check")]
    config_check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onlinereg_exporter=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting online-registration exporter"
    );

    // Initial load is fatal on error; reload failures later are not.
    let config = match load_config(&args.config_file) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = ?args.config_file, error = %e, "Error loading config");
            return Err(e.into());
        }
    };

    if args.config_check {
        tracing::info!("Config file is ok, exiting...");
        return Ok(());
    }

    tracing::info!(
        path = ?args.config_file,
        plans = config.plans.len(),
        "Loaded config file"
    );

    let metrics = Arc::new(ExporterMetrics::new());
    metrics.record_reload(true);

    let store = Arc::new(ConfigStore::new(config));
    let (coordinator, reload) =
        ReloadCoordinator::new(store.clone(), args.config_file.clone(), metrics.clone());
    tokio::spawn(coordinator.run());
    spawn_reload_on_sighup(reload.clone());

    let http = CapacityClient::http_client()?;
    let pipeline = CollectionPipeline::new(store, http, metrics);

    // Bind failure is fatal
    let listener = TcpListener::bind(&args.listen_address).await?;

    let server = HttpServer::new(pipeline, reload);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
