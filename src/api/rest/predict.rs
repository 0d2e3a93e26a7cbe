//! Prediction endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::ApiError;
use crate::api::state::AppState;
use crate::language::Language;
use crate::types::{RecommendationResult, Suggestion};

/// Request body for `POST /predict_medicine`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Free-text symptoms in English, Telugu, or both
    pub symptoms: String,
    /// Number of suggestions; server default when absent
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Response body for `POST /predict_medicine`
///
/// Field names are a compatibility contract with the calling application.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub input_language: Language,
    pub normalized_symptoms_en: String,
    pub suggestions: Vec<Suggestion>,
}

impl From<RecommendationResult> for PredictResponse {
    fn from(result: RecommendationResult) -> Self {
        Self {
            input_language: result.input_language,
            normalized_symptoms_en: result.normalized_query,
            suggestions: result.suggestions,
        }
    }
}

/// POST /predict_medicine - Suggest medicines for the given symptoms
///
/// Ranking runs on the blocking pool; the encoder and translation models
/// are synchronous and compute-bound.
pub async fn predict_medicine(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let error = ApiError::bad_request(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let service = Arc::clone(&state.service);
    let top_k = service.config().resolve_top_k(request.top_k);

    match tokio::task::spawn_blocking(move || service.recommend(&request.symptoms, top_k)).await {
        Ok(result) => (StatusCode::OK, Json(PredictResponse::from(result))).into_response(),
        Err(e) => {
            error!(error = %e, "recommendation task failed");
            let error = ApiError::internal("recommendation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
