//! Source verification and PII redaction endpoints

use crate::compliance;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ComplianceRequest {
    /// Vendor source domain
    pub domain: String,
    /// Proposed license identifier
    pub license: String,
}

/// The three independent verification results
#[derive(Debug, Serialize)]
pub struct ComplianceResponse {
    /// Domain has prior contract history
    pub trusted: bool,
    /// License is on the disallowed list
    pub incompatible_license: bool,
    /// Domain matches the sanctions watchlist
    pub sanctioned: bool,
}

/// POST /compliance
pub async fn run_compliance(
    Json(request): Json<ComplianceRequest>,
) -> ApiResult<Json<ComplianceResponse>> {
    if request.domain.trim().is_empty() {
        return Err(ApiError::BadRequest("domain must not be empty".to_string()));
    }

    Ok(Json(ComplianceResponse {
        trusted: compliance::is_trusted_domain(&request.domain),
        incompatible_license: compliance::is_incompatible_license(&request.license),
        sanctioned: compliance::is_sanctioned(&request.domain),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RedactRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RedactResponse {
    pub redacted: String,
}

/// POST /redact
pub async fn run_redaction(Json(request): Json<RedactRequest>) -> Json<RedactResponse> {
    Json(RedactResponse {
        redacted: compliance::redact_pii(&request.text),
    })
}

/// Build compliance routes
pub fn compliance_routes() -> Router<AppState> {
    Router::new()
        .route("/compliance", post(run_compliance))
        .route("/redact", post(run_redaction))
}
