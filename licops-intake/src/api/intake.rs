//! Intake endpoint: raw text in, stored record out

use crate::api::session_id;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ExtractionError, Extractor, RuleBasedExtractor};
use crate::AppState;
use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use licops_common::IntakeRecord;
use serde::Deserialize;
use tracing::{info, warn};

/// Extraction strategy selection
///
/// `Auto` uses the model when a credential is configured and the rule-based
/// fallback otherwise. A failed model attempt is reported, never silently
/// downgraded; the caller may re-submit with `Fallback`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Auto,
    Model,
    Fallback,
}

#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    /// Raw inbound inquiry text
    pub raw_text: String,
    #[serde(default)]
    pub strategy: Strategy,
}

/// POST /intake
///
/// Runs the selected extraction strategy and, on success, appends the
/// resulting record to the caller's session store. On extraction failure
/// nothing is appended and the failure is reported as recoverable.
pub async fn submit_intake(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<IntakeRequest>,
) -> ApiResult<Json<IntakeRecord>> {
    let session = session_id(&headers)?;

    if request.raw_text.trim().is_empty() {
        return Err(ApiError::BadRequest("raw_text must not be empty".to_string()));
    }

    let model = match request.strategy {
        Strategy::Fallback => None,
        Strategy::Model => Some(state.model_extractor.as_ref().ok_or_else(|| {
            ApiError::BadRequest(
                "Model strategy requested but no model API key is configured".to_string(),
            )
        })?),
        Strategy::Auto => state.model_extractor.as_ref(),
    };
    let strategy_name = model.map_or("rule-based", |e| e.name());

    let fields = match model {
        Some(extractor) => extractor.extract(&request.raw_text).await.map_err(|err| {
            warn!(error = %err, "Model extraction failed");
            match err {
                ExtractionError::Transport(msg) => ApiError::ExtractionFailed(msg),
                ExtractionError::MalformedOutput(msg) => ApiError::ExtractionFailed(msg),
            }
        })?,
        None => RuleBasedExtractor::extract_fields(&request.raw_text),
    };

    let mut sessions = state.sessions.write().await;
    let store = sessions.entry(session).or_default();
    let record = store.append(fields);

    info!(
        session = %session,
        record_id = %record.id,
        partner = %record.partner_name,
        strategy = strategy_name,
        "Intake record appended"
    );

    Ok(Json(record))
}

/// Build intake routes
pub fn intake_routes() -> Router<AppState> {
    Router::new().route("/intake", post(submit_intake))
}
