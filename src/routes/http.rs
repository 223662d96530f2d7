// GET handlers: chart page, version, latest report, pie slices.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use super::AppState;
use crate::presenter::chart::{Denominator, pie_slices};
use crate::version::{NAME, VERSION};

/// GET / — the embedded pie chart page (fetches /api/chart).
pub(super) async fn index_handler() -> impl IntoResponse {
    Html(include_str!("index.html"))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/report — the most recent full report, 404 before the first
/// completed cycle.
pub(super) async fn report_handler(State(state): State<AppState>) -> Response {
    match state.latest.read().await.clone() {
        Some(report) => axum::Json(report).into_response(),
        None => no_report(),
    }
}

#[derive(Deserialize)]
pub(super) struct ChartQuery {
    denominator: Option<String>,
}

/// GET /api/chart?denominator=used|total — pie slices from the most
/// recent report.
pub(super) async fn chart_handler(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Response {
    let denominator = match query.denominator.as_deref().unwrap_or("used").parse::<Denominator>() {
        Ok(d) => d,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(serde_json::json!({ "error": e })),
            )
                .into_response();
        }
    };
    match state.latest.read().await.as_ref() {
        Some(report) => axum::Json(serde_json::json!({
            "timestampMs": report.timestamp_ms,
            "totals": report.totals,
            "denominator": denominator,
            "slices": pie_slices(report, denominator),
        }))
        .into_response(),
        None => no_report(),
    }
}

fn no_report() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "error": "no report yet" })),
    )
        .into_response()
}
