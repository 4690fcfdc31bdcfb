//! Integration tests for the licops-scout HTTP API

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use licops_scout::catalog::default_catalog;
use licops_scout::matcher::KeywordOverlapScorer;
use licops_scout::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn default_state() -> AppState {
    AppState::new(default_catalog(), Arc::new(KeywordOverlapScorer))
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn python_query_is_a_conflict_with_codenet() {
    let (status, body) = send(
        default_state(),
        post_json("/redundancy", json!({ "query_text": "python ML datasets" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "conflict");
    assert_eq!(body["top_match"]["asset"]["id"], "CTR-2024-045");
    assert!((body["top_match"]["score"].as_f64().unwrap() - 0.85).abs() < 1e-6);
}

#[tokio::test]
async fn weak_overlap_is_no_conflict() {
    let (status, body) = send(
        default_state(),
        post_json(
            "/redundancy",
            json!({ "query_text": "english language forum posts" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "no_conflict");
    // Candidates below the threshold are still listed
    assert!(!body["matches"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unrelated_query_has_no_matches() {
    let (_, body) = send(
        default_state(),
        post_json("/redundancy", json!({ "query_text": "satellite telemetry" })),
    )
    .await;

    assert_eq!(body["verdict"], "no_conflict");
    assert_eq!(body["matches"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let (status, body) = send(
        default_state(),
        post_json("/redundancy", json!({ "query_text": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn compliance_flags_untrusted_and_incompatible() {
    let (status, body) = send(
        default_state(),
        post_json(
            "/compliance",
            json!({ "domain": "random-scraper.xyz", "license": "GPL v3" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trusted"], false);
    assert_eq!(body["incompatible_license"], true);
    assert_eq!(body["sanctioned"], false);
}

#[tokio::test]
async fn compliance_clears_trusted_source() {
    let (_, body) = send(
        default_state(),
        post_json(
            "/compliance",
            json!({ "domain": "github.com", "license": "CC-BY-4.0" }),
        ),
    )
    .await;

    assert_eq!(body["trusted"], true);
    assert_eq!(body["incompatible_license"], false);
    assert_eq!(body["sanctioned"], false);
}

#[tokio::test]
async fn compliance_flags_sanctioned_entity() {
    let (_, body) = send(
        default_state(),
        post_json(
            "/compliance",
            json!({ "domain": "data.scrape-bot.io", "license": "Commercial-Safe" }),
        ),
    )
    .await;

    assert_eq!(body["sanctioned"], true);
}

#[tokio::test]
async fn redact_endpoint_masks_pii() {
    let (status, body) = send(
        default_state(),
        post_json(
            "/redact",
            json!({ "text": "contact me at a@b.com or 555-123-4567" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["redacted"],
        "contact me at [EMAIL_REDACTED] or [PHONE_REDACTED]"
    );
}

#[tokio::test]
async fn catalog_lists_compiled_assets() {
    let request = Request::builder()
        .method("GET")
        .uri("/catalog")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(default_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    let assets = body.as_array().unwrap();
    assert_eq!(assets.len(), 3);
    assert_eq!(assets[0]["id"], "CTR-2023-001");
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(default_state(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "licops-scout");
    assert_eq!(body["catalog_size"], 3);
}
