//! Record listing and editing endpoints

use crate::api::session_id;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, patch},
    Json, Router,
};
use licops_common::{DealStatus, IntakeRecord, RiskLevel};
use serde::Deserialize;
use uuid::Uuid;

/// Filters for record listing
///
/// `min_value` supports the dashboard's opportunity-explorer view.
#[derive(Debug, Default, Deserialize)]
pub struct RecordFilter {
    pub status: Option<DealStatus>,
    pub min_value: Option<u64>,
}

/// GET /records
///
/// Returns the session's records in insertion order, optionally filtered.
/// A session that has never submitted anything gets an empty list.
pub async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<RecordFilter>,
) -> ApiResult<Json<Vec<IntakeRecord>>> {
    let session = session_id(&headers)?;

    let sessions = state.sessions.read().await;
    let records = sessions
        .get(&session)
        .map(|store| {
            store
                .records()
                .iter()
                .filter(|r| filter.status.map_or(true, |wanted| wanted == r.status))
                .filter(|r| filter.min_value.map_or(true, |min| r.estimated_value >= min))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(records))
}

/// Editable fields of a stored record
#[derive(Debug, Deserialize)]
pub struct RecordEdit {
    pub status: Option<DealStatus>,
    pub risk_level: Option<RiskLevel>,
}

/// PATCH /records/{id}
///
/// Applies a user edit to the editable fields (`status`, `risk_level`).
pub async fn edit_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<Uuid>,
    Json(edit): Json<RecordEdit>,
) -> ApiResult<Json<IntakeRecord>> {
    let session = session_id(&headers)?;

    let mut sessions = state.sessions.write().await;
    let store = sessions
        .get_mut(&session)
        .ok_or_else(|| ApiError::NotFound(format!("No records for session {}", session)))?;

    store
        .update(record_id, edit.status, edit.risk_level)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Record {} not found", record_id)))
}

/// Build record routes
pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records))
        .route("/records/:id", patch(edit_record))
}
