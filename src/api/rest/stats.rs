//! Stats endpoint

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::api::state::AppState;
use crate::service::ServiceStats;

/// GET /stats - Dataset size and active backends
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ServiceStats> {
    Json(state.service.stats())
}
