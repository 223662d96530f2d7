// HTTP + WebSocket routes for the chart presenter.

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{RwLock, broadcast};
use tower_http::cors::{Any, CorsLayer};

use crate::models::CacheReport;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) report_tx: broadcast::Sender<CacheReport>,
    pub(crate) latest: Arc<RwLock<Option<CacheReport>>>,
    pub(crate) ws_connections: Arc<AtomicUsize>,
}

pub fn app(
    report_tx: broadcast::Sender<CacheReport>,
    latest: Arc<RwLock<Option<CacheReport>>>,
    ws_connections: Arc<AtomicUsize>,
) -> Router {
    let state = AppState {
        report_tx,
        latest,
        ws_connections,
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET / (chart page)
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/report", get(http::report_handler)) // GET /api/report
        .route("/api/chart", get(http::chart_handler)) // GET /api/chart?denominator=used|total
        .route("/ws/report", get(ws::ws_report)) // WS /ws/report
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Keeps the latest report available to the GET handlers; the worker only
/// broadcasts. Exits when the channel closes.
pub fn spawn_report_cache(
    mut rx: broadcast::Receiver<CacheReport>,
    latest: Arc<RwLock<Option<CacheReport>>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(report) => {
                    *latest.write().await = Some(report);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::debug!(missed = n, "report cache lagged behind reports");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
