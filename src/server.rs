//! HTTP front end
//!
//! - `GET /` and `GET /index.html` serve the landing page
//! - `GET /api` starts a processing cycle in the background
//! - `GET /stats` returns the current usage statistics as JSON

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use crate::cycle::run_cycle;
use crate::fetch::ResourceFetcher;
use crate::stats::StatsSnapshot;

/// Port used when neither `--port` nor `PORT` is given
pub const DEFAULT_PORT: u16 = 3000;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Body returned by `GET /stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub api_call_count: u64,
    pub cache_size: usize,
    pub error_count: u64,
    pub debug_enabled: bool,
    pub timeout_ms: u64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(snapshot: StatsSnapshot) -> Self {
        Self {
            api_call_count: snapshot.api_call_count,
            cache_size: snapshot.cache_size,
            error_count: snapshot.error_count,
            debug_enabled: snapshot.debug_enabled,
            timeout_ms: snapshot.timeout_ms,
        }
    }
}

/// Creates the router with all routes configured
pub fn create_router(fetcher: Arc<ResourceFetcher>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/api", get(trigger_cycle))
        .route("/stats", get(stats))
        .fallback(not_found)
        .with_state(fetcher)
}

/// Binds to `addr` and serves until the process exits
pub async fn serve(fetcher: Arc<ResourceFetcher>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}/", listener.local_addr()?);
    axum::serve(listener, create_router(fetcher)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Starts a cycle and answers right away; the cycle's outcome is only logged
async fn trigger_cycle(State(fetcher): State<Arc<ResourceFetcher>>) -> impl IntoResponse {
    tokio::spawn(async move {
        let mut stdout = std::io::stdout();
        if let Err(err) = run_cycle(&fetcher, &mut stdout).await {
            error!(error = %err, "processing cycle aborted");
        }
    });

    (
        StatusCode::OK,
        "Request to /api received. Check the server console for output.",
    )
}

async fn stats(State(fetcher): State<Arc<ResourceFetcher>>) -> Json<StatsResponse> {
    Json(fetcher.snapshot().into())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 - Route not found")
}
