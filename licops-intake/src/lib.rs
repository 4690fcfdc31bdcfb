//! licops-intake library interface
//!
//! Exposes the intake pipeline for integration testing: extraction
//! strategies, the price fairness evaluator, the session-scoped record
//! store, and the HTTP router.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod pricing;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use crate::extractors::Extractor;
use crate::pricing::DealBook;
use crate::store::SessionStore;
use axum::Router;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-session record stores, keyed by the client's session id
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionStore>>>,
    /// Model-backed extractor; `None` when no credential is configured
    pub model_extractor: Option<Arc<dyn Extractor>>,
    /// Historical deals; `None` when the reference file failed to load
    pub deal_book: Option<Arc<DealBook>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(model_extractor: Option<Arc<dyn Extractor>>, deal_book: Option<DealBook>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            model_extractor,
            deal_book: deal_book.map(Arc::new),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::intake_routes())
        .merge(api::record_routes())
        .merge(api::benchmark_routes())
        .merge(api::metrics_routes())
        .merge(api::health_routes())
        .with_state(state)
}
