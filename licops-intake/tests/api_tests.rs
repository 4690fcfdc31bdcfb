//! Integration tests for the licops-intake HTTP API
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot`; the
//! model path is exercised through fake extractors injected into AppState.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use licops_common::{DataType, ExtractedFields, RiskLevel};
use licops_intake::extractors::{ExtractionError, Extractor};
use licops_intake::pricing::{DealBook, HistoricalDeal};
use licops_intake::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Fake model extractor returning a fixed result
struct FixedExtractor(ExtractedFields);

#[async_trait::async_trait]
impl Extractor for FixedExtractor {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn extract(&self, _raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        Ok(self.0.clone())
    }
}

/// Fake model extractor that always fails
struct FailingExtractor;

#[async_trait::async_trait]
impl Extractor for FailingExtractor {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn extract(&self, _raw_text: &str) -> Result<ExtractedFields, ExtractionError> {
        Err(ExtractionError::Transport("endpoint unreachable".to_string()))
    }
}

fn image_deal_book() -> DealBook {
    DealBook::from_deals(vec![HistoricalDeal {
        data_type: DataType::Image,
        unit_price: 10.0,
    }])
}

fn fallback_only_state() -> AppState {
    AppState::new(None, Some(image_deal_book()))
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, session: Option<Uuid>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(session) = session {
        builder = builder.header("x-session-id", session.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, session: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(session) = session {
        builder = builder.header("x-session-id", session.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn fallback_intake_appends_and_round_trips() {
    let state = fallback_only_state();
    let session = Uuid::new_v4();

    let (status, record) = send(
        state.clone(),
        post_json(
            "/intake",
            Some(session),
            json!({
                "raw_text": "DeepDive Analytics wants to license 50TB of video. Asking $150k. GDPR concern."
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["partner_name"], "DeepDive Analytics");
    assert_eq!(record["risk_level"], "High");
    assert_eq!(record["estimated_value"], 150_000);
    assert_eq!(record["status"], "Needs Review");

    let (status, records) = send(state, get("/records", Some(session))).await;
    assert_eq!(status, StatusCode::OK);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], record["id"]);
    assert_eq!(records[0]["summary"], record["summary"]);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let state = fallback_only_state();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let (status, _) = send(
        state.clone(),
        post_json("/intake", Some(first), json!({ "raw_text": "mediscan x-ray offer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, records) = send(state, get("/records", Some(second))).await;
    assert_eq!(records.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn missing_session_header_is_rejected() {
    let (status, body) = send(
        fallback_only_state(),
        post_json("/intake", None, json!({ "raw_text": "anything" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let (status, _) = send(
        fallback_only_state(),
        post_json("/intake", Some(Uuid::new_v4()), json!({ "raw_text": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn model_failure_reports_502_and_appends_nothing() {
    let state = AppState::new(Some(Arc::new(FailingExtractor)), None);
    let session = Uuid::new_v4();

    let (status, body) = send(
        state.clone(),
        post_json("/intake", Some(session), json!({ "raw_text": "an inquiry" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");

    let (_, records) = send(state, get("/records", Some(session))).await;
    assert_eq!(records.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn explicit_fallback_bypasses_failing_model() {
    let state = AppState::new(Some(Arc::new(FailingExtractor)), None);

    let (status, record) = send(
        state,
        post_json(
            "/intake",
            Some(Uuid::new_v4()),
            json!({ "raw_text": "opencode repo dump", "strategy": "fallback" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["partner_name"], "OpenCode Foundation");
    assert_eq!(record["data_type"], "Code");
}

#[tokio::test]
async fn model_strategy_without_key_is_client_error() {
    let (status, body) = send(
        fallback_only_state(),
        post_json(
            "/intake",
            Some(Uuid::new_v4()),
            json!({ "raw_text": "an inquiry", "strategy": "model" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn auto_strategy_uses_configured_model() {
    let fields = ExtractedFields {
        partner_name: "GlobalBroadcast Corp".to_string(),
        data_type: DataType::Multimodal,
        risk_level: RiskLevel::Medium,
        estimated_value: 75_000,
        summary: "Broadcast archive licensing inquiry.".to_string(),
    };
    let state = AppState::new(Some(Arc::new(FixedExtractor(fields))), None);

    let (status, record) = send(
        state,
        post_json("/intake", Some(Uuid::new_v4()), json!({ "raw_text": "an inquiry" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["partner_name"], "GlobalBroadcast Corp");
    assert_eq!(record["data_type"], "Multimodal");
}

#[tokio::test]
async fn record_edit_updates_status_and_risk() {
    let state = fallback_only_state();
    let session = Uuid::new_v4();

    let (_, record) = send(
        state.clone(),
        post_json("/intake", Some(session), json!({ "raw_text": "pixelperfect image pack $9k" })),
    )
    .await;
    let id = record["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/records/{}", id))
        .header("content-type", "application/json")
        .header("x-session-id", session.to_string())
        .body(Body::from(
            json!({ "status": "Signed", "risk_level": "Low" }).to_string(),
        ))
        .unwrap();
    let (status, updated) = send(state.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Signed");
    assert_eq!(updated["risk_level"], "Low");
    assert_eq!(updated["id"], record["id"]);

    // Status filter sees the edit
    let (_, pending) = send(state, get("/records?status=Needs%20Review", Some(session))).await;
    assert_eq!(pending.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn edit_unknown_record_is_404() {
    let state = fallback_only_state();
    let session = Uuid::new_v4();

    send(
        state.clone(),
        post_json("/intake", Some(session), json!({ "raw_text": "seed the session" })),
    )
    .await;

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/records/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .header("x-session-id", session.to_string())
        .body(Body::from(json!({ "status": "Signed" }).to_string()))
        .unwrap();
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn min_value_filter_applies() {
    let state = fallback_only_state();
    let session = Uuid::new_v4();

    for text in ["deal one $40k", "deal two $120k"] {
        send(state.clone(), post_json("/intake", Some(session), json!({ "raw_text": text }))).await;
    }

    let (_, records) = send(state, get("/records?min_value=100000", Some(session))).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["estimated_value"], 120_000);
}

#[tokio::test]
async fn benchmark_overpaying_quote() {
    let (status, body) = send(
        fallback_only_state(),
        post_json(
            "/benchmark",
            None,
            json!({ "data_type": "Image", "proposed_price": 120000.0, "volume": 10000 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "benchmarked");
    assert_eq!(body["fair_price"], 100_000.0);
    assert_eq!(body["difference"], 20_000.0);
    assert_eq!(body["is_overpaying"], true);
    assert!((body["suggested_counter_offer"].as_f64().unwrap() - 110_000.0).abs() < 1e-6);
}

#[tokio::test]
async fn benchmark_without_matching_type_is_no_benchmark() {
    let (status, body) = send(
        fallback_only_state(),
        post_json(
            "/benchmark",
            None,
            json!({ "data_type": "Audio", "proposed_price": 1000.0, "volume": 10 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "no_benchmark");
}

#[tokio::test]
async fn benchmark_unknown_label_is_client_error() {
    let (status, _) = send(
        fallback_only_state(),
        post_json(
            "/benchmark",
            None,
            json!({ "data_type": "Genomics", "proposed_price": 1000.0, "volume": 10 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn benchmark_without_deal_book_is_503() {
    let state = AppState::new(None, None);

    let (status, body) = send(
        state,
        post_json(
            "/benchmark",
            None,
            json!({ "data_type": "Image", "proposed_price": 1000.0, "volume": 10 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "BENCHMARK_UNAVAILABLE");
}

#[tokio::test]
async fn metrics_summarize_the_session() {
    let state = fallback_only_state();
    let session = Uuid::new_v4();

    send(
        state.clone(),
        post_json("/intake", Some(session), json!({ "raw_text": "gdpr dataset $100k" })),
    )
    .await;
    send(
        state.clone(),
        post_json("/intake", Some(session), json!({ "raw_text": "plain text corpus $20k" })),
    )
    .await;

    let (status, body) = send(state, get("/metrics", Some(session))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_pipeline_value"], 120_000);
    assert_eq!(body["pending_count"], 2);
    assert_eq!(body["high_risk_count"], 1);
    assert_eq!(body["value_by_data_type"]["Text"], 120_000);
}

#[tokio::test]
async fn health_reports_configuration() {
    let (status, body) = send(fallback_only_state(), get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "licops-intake");
    assert_eq!(body["model_configured"], false);
    assert_eq!(body["benchmark_available"], true);
}
