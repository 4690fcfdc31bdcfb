//! HTTP API for licops-intake
//!
//! Route groups:
//! - `POST /intake` - run an extraction and append the record
//! - `GET /records`, `PATCH /records/{id}` - list and edit stored records
//! - `POST /benchmark` - price fairness evaluation
//! - `GET /metrics` - per-session dashboard summary
//! - `GET /health` - service health
//!
//! Record endpoints are session-scoped: clients pass an `X-Session-Id`
//! header (a UUID of their choosing) and only ever see their own store.

pub mod benchmark;
pub mod health;
pub mod intake;
pub mod metrics;
pub mod records;

pub use benchmark::benchmark_routes;
pub use health::health_routes;
pub use intake::intake_routes;
pub use metrics::metrics_routes;
pub use records::record_routes;

use crate::error::ApiError;
use axum::http::HeaderMap;
use uuid::Uuid;

/// Session identity header
pub const SESSION_HEADER: &str = "x-session-id";

/// Extract and validate the caller's session id
pub fn session_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let value = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| ApiError::BadRequest("Missing X-Session-Id header".to_string()))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::BadRequest("Invalid X-Session-Id header".to_string()))?;

    Uuid::parse_str(value)
        .map_err(|_| ApiError::BadRequest("X-Session-Id must be a UUID".to_string()))
}
