//! HTTP API tests against the full router

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use medicine_recommender::api::http::create_router;
use medicine_recommender::api::state::AppState;
use medicine_recommender::ranker::LexicalRanker;
use medicine_recommender::translation::IdentityTranslator;
use medicine_recommender::{Dataset, DatasetRow, EngineConfig, RecommendationService};

fn app() -> Router {
    let dataset = Dataset::from_rows(vec![
        DatasetRow::from_cells("fever headache", "Paracetamol|Crocin"),
        DatasetRow::from_cells("dry cough sore throat", "Benadryl|Strepsils"),
        DatasetRow::from_cells("fever chills body ache", "Dolo 650|Paracetamol|Ibuprofen"),
        DatasetRow::from_cells("జ్వరం తలనొప్పి", "Paracetamol"),
    ]);
    let ranker = Box::new(LexicalRanker::new(&dataset));
    let config = EngineConfig {
        max_top_k: 3,
        ..Default::default()
    };
    let service = RecommendationService::from_parts(dataset, ranker, Box::new(IdentityTranslator), config);
    create_router(Arc::new(AppState::new(Arc::new(service))))
}

async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict_medicine")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_predict_english() {
    let (status, body) = post_json(app(), r#"{"symptoms": "fever and headache"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_language"], "en");
    assert_eq!(body["normalized_symptoms_en"], "fever and headache");

    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions[0]["medicine"], "Paracetamol");
    assert_eq!(suggestions[1]["medicine"], "Crocin");
    assert!(suggestions[0]["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_predict_top_k_is_honored_and_clamped() {
    let (_, body) = post_json(app(), r#"{"symptoms": "fever", "top_k": 1}"#).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 1);

    let (_, body) = post_json(app(), r#"{"symptoms": "fever", "top_k": 1000}"#).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_predict_telugu() {
    let (status, body) = post_json(app(), r#"{"symptoms": "జ్వరం తలనొప్పి"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_language"], "te");
    assert_eq!(body["suggestions"][0]["medicine"], "Paracetamol");
}

#[tokio::test]
async fn test_predict_blank_symptoms() {
    let (status, body) = post_json(app(), r#"{"symptoms": "   "}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_language"], "en");
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn test_predict_missing_symptoms_is_bad_request() {
    let (status, body) = post_json(app(), r#"{"text": "fever"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_malformed_json_is_bad_request() {
    let (status, body) = post_json(app(), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_stats() {
    let response = app()
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["rows"], 4);
    assert_eq!(body["ranker"], "lexical");
    assert_eq!(body["translator"], "identity");
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
