//! Price benchmark endpoint

use crate::error::{ApiError, ApiResult};
use crate::pricing::FairnessOutcome;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use licops_common::DataType;
use serde::{Deserialize, Serialize};

/// Markup applied to the fair price when suggesting a counter-offer
const COUNTER_OFFER_MARKUP: f64 = 1.1;

#[derive(Debug, Deserialize)]
pub struct BenchmarkRequest {
    /// Data-type label, mapped onto the canonical enumeration
    pub data_type: String,
    pub proposed_price: f64,
    pub volume: u64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BenchmarkResponse {
    /// No historical deals for this data type
    NoBenchmark,
    Benchmarked {
        fair_price: f64,
        difference: f64,
        is_overpaying: bool,
        /// Negotiation aid; only present when overpaying
        #[serde(skip_serializing_if = "Option::is_none")]
        suggested_counter_offer: Option<f64>,
    },
}

/// POST /benchmark
///
/// Stateless comparison against the historical deal book. Returns 503 when
/// the reference data never loaded; the rest of the service is unaffected.
pub async fn run_benchmark(
    State(state): State<AppState>,
    Json(request): Json<BenchmarkRequest>,
) -> ApiResult<Json<BenchmarkResponse>> {
    let data_type = DataType::from_label(&request.data_type).ok_or_else(|| {
        ApiError::BadRequest(format!("Unknown data_type label: {:?}", request.data_type))
    })?;

    if !request.proposed_price.is_finite() || request.proposed_price < 0.0 {
        return Err(ApiError::BadRequest(
            "proposed_price must be a non-negative number".to_string(),
        ));
    }

    let deal_book = state.deal_book.as_ref().ok_or_else(|| {
        ApiError::BenchmarkUnavailable("Historical deals reference data not loaded".to_string())
    })?;

    let response = match deal_book.evaluate(data_type, request.proposed_price, request.volume) {
        FairnessOutcome::NoBenchmark => BenchmarkResponse::NoBenchmark,
        FairnessOutcome::Benchmarked {
            fair_price,
            difference,
            is_overpaying,
        } => BenchmarkResponse::Benchmarked {
            fair_price,
            difference,
            is_overpaying,
            suggested_counter_offer: is_overpaying.then(|| fair_price * COUNTER_OFFER_MARKUP),
        },
    };

    Ok(Json(response))
}

/// Build benchmark routes
pub fn benchmark_routes() -> Router<AppState> {
    Router::new().route("/benchmark", post(run_benchmark))
}
