//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub const MOCK_USER: &str = "svc-exporter";
pub const MOCK_TOKEN: &str = "mock-token";

/// Canned response for one plan on the mock registration API.
#[derive(Clone)]
pub enum PlanResponse {
    /// Well-formed capacity envelope.
    Capacity {
        is_hidden: bool,
        subscriber_limit: i64,
        capacity_consumed: i64,
        capacity_remaining: i64,
    },
    /// Non-JSON 500 body; the exporter must count it as one error.
    Broken,
}

pub fn capacity(limit: i64, consumed: i64) -> PlanResponse {
    PlanResponse::Capacity {
        is_hidden: false,
        subscriber_limit: limit,
        capacity_consumed: consumed,
        capacity_remaining: limit - consumed,
    }
}

#[derive(Clone)]
struct MockState {
    plans: Arc<HashMap<String, PlanResponse>>,
    hits: Arc<AtomicUsize>,
}

/// Running mock registration API.
pub struct MockApi {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
}

impl MockApi {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock capacity API on an ephemeral port.
///
/// Every request must carry the bearer token and the
/// `authorization_username` query parameter, otherwise a non-envelope 401
/// body is returned (which the exporter sees as a decode failure).
pub async fn start_mock_api(plans: Vec<(&str, PlanResponse)>) -> MockApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        plans: Arc::new(
            plans
                .into_iter()
                .map(|(name, response)| (name.to_string(), response))
                .collect(),
        ),
        hits: hits.clone(),
    };

    let router = Router::new()
        .route("/plans/{plan}/capacity", get(capacity_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockApi { addr, hits }
}

async fn capacity_handler(
    State(state): State<MockState>,
    Path(plan): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> axum::response::Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if authorization != format!("Bearer {MOCK_TOKEN}")
        || params.get("authorization_username").map(String::as_str) != Some(MOCK_USER)
    {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }

    match state.plans.get(&plan) {
        Some(PlanResponse::Capacity {
            is_hidden,
            subscriber_limit,
            capacity_consumed,
            capacity_remaining,
        }) => Json(json!({
            "plan": {
                "id": 1,
                "name": plan,
                "type": "standard",
                "display_name": plan,
                "is_hidden": is_hidden,
                "subscriber_limit": subscriber_limit,
                "capacity_consumed": capacity_consumed,
                "capacity_remaining": capacity_remaining,
            }
        }))
        .into_response(),
        Some(PlanResponse::Broken) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such plan").into_response(),
    }
}

/// Write a scratch config file and return its path.
pub fn write_config_file(tag: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "onlinereg-exporter-test-{}-{}.toml",
        std::process::id(),
        tag
    ));
    std::fs::write(&path, content).unwrap();
    path
}

/// Render a config document pointing at the mock API.
pub fn config_toml(base_url: &str, plans: &[&str]) -> String {
    let plan_list = plans
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"plans = [{plan_list}]

[api]
url = "{base_url}"
user = "{MOCK_USER}"
token = "{MOCK_TOKEN}"
"#
    )
}
