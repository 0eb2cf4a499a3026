//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router (`/`, `/metrics`, `/-/reload`)
//! - Dispatch scrapes to the collection pipeline
//! - Bridge the reload endpoint to the reload coordinator
//! - Serve with graceful shutdown

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::collector::CollectionPipeline;
use crate::config::reload::ReloadHandle;
use crate::lifecycle::wait_for_shutdown;

const LANDING_PAGE: &str = r#"<html>
    <head><title>Online-registration Exporter</title></head>
    <body>
    <h1>Online-registration Exporter</h1>
    <p><a href="/metrics">Metrics</a></p>
    </body>
    </html>"#;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: CollectionPipeline,
    pub reload: ReloadHandle,
}

/// HTTP server for the exporter.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(pipeline: CollectionPipeline, reload: ReloadHandle) -> Self {
        let state = AppState { pipeline, reload };
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(landing_handler))
            .route("/metrics", get(metrics_handler))
            // POST only; axum answers other methods with 405
            .route("/-/reload", post(reload_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Listening on address");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// One scrape: fresh fetches, fresh recorder, rendered exposition text.
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.pipeline.collect().await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}

/// Synchronous reload: blocks until the coordinator reports the outcome.
async fn reload_handler(State(state): State<AppState>) -> Response {
    match state.reload.reload().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to reload config: {e}\n"),
        )
            .into_response(),
    }
}
