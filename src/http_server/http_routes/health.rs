use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::http_server::state::AppState;

pub const SERVICE_NAME: &str = "YouTube Music Search API";
pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub async fn health(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = if app_state.search.is_available() {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status,
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}
