//! licops-scout library interface
//!
//! Exposes the redundancy matcher, knowledge catalog, compliance checks,
//! and the HTTP router for integration testing.

pub mod api;
pub mod catalog;
pub mod compliance;
pub mod error;
pub mod matcher;

pub use crate::error::{ApiError, ApiResult};

use crate::catalog::KnowledgeAsset;
use crate::matcher::SimilarityScorer;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only knowledge catalog
    pub catalog: Arc<Vec<KnowledgeAsset>>,
    /// Pluggable similarity scorer
    pub scorer: Arc<dyn SimilarityScorer>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Vec<KnowledgeAsset>, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scorer,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::redundancy_routes())
        .merge(api::compliance_routes())
        .merge(api::health_routes())
        .with_state(state)
}
