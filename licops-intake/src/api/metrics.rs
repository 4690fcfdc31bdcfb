//! Per-session dashboard metrics endpoint

use crate::api::session_id;
use crate::error::ApiResult;
use crate::store::MetricsSummary;
use crate::AppState;
use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};

/// GET /metrics
///
/// Summary over the caller's session store: total pipeline value, pending
/// and high-risk counts, and value by data type. An empty session yields
/// the zero summary.
pub async fn session_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<MetricsSummary>> {
    let session = session_id(&headers)?;

    let sessions = state.sessions.read().await;
    let summary = sessions
        .get(&session)
        .map(|store| store.metrics())
        .unwrap_or_else(|| crate::store::SessionStore::new().metrics());

    Ok(Json(summary))
}

/// Build metrics routes
pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(session_metrics))
}
