//! Redundancy check endpoint

use crate::catalog::KnowledgeAsset;
use crate::error::{ApiError, ApiResult};
use crate::matcher::{self, RankedMatch, CONFLICT_THRESHOLD};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RedundancyRequest {
    /// Vendor proposal text to check against the catalog
    pub query_text: String,
}

/// Conflict verdict over the ranked matches
#[derive(Debug, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum RedundancyVerdict {
    /// Top match scored at or above the conflict threshold
    Conflict { top_match: RankedMatch },
    /// No match reached the threshold; safe to proceed
    NoConflict,
}

#[derive(Debug, Serialize)]
pub struct RedundancyResponse {
    #[serde(flatten)]
    pub verdict: RedundancyVerdict,
    /// All non-zero matches, score descending
    pub matches: Vec<RankedMatch>,
    pub threshold: f32,
}

/// POST /redundancy
///
/// Scores the proposal against every catalog asset and applies the
/// conflict threshold to the top result.
pub async fn check_redundancy(
    State(state): State<AppState>,
    Json(request): Json<RedundancyRequest>,
) -> ApiResult<Json<RedundancyResponse>> {
    if request.query_text.trim().is_empty() {
        return Err(ApiError::BadRequest("query_text must not be empty".to_string()));
    }

    let matches = matcher::search(&request.query_text, &state.catalog, state.scorer.as_ref());
    let conflict = matcher::is_conflict(&matches);

    let verdict = if conflict {
        RedundancyVerdict::Conflict {
            top_match: matches[0].clone(),
        }
    } else {
        RedundancyVerdict::NoConflict
    };

    info!(
        candidates = matches.len(),
        conflict = conflict,
        "Redundancy check complete"
    );

    Ok(Json(RedundancyResponse {
        verdict,
        matches,
        threshold: CONFLICT_THRESHOLD,
    }))
}

/// GET /catalog
pub async fn list_catalog(State(state): State<AppState>) -> Json<Vec<KnowledgeAsset>> {
    Json(state.catalog.as_ref().clone())
}

/// Build redundancy routes
pub fn redundancy_routes() -> Router<AppState> {
    Router::new()
        .route("/redundancy", post(check_redundancy))
        .route("/catalog", get(list_catalog))
}
