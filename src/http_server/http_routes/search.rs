use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::http_server::{error::ApiError, state::AppState};
use crate::services::search::types::SearchResponse;

/// Query string of `GET /search`. `q` is preferred, `query` is accepted for
/// older clients.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchBody {
    #[serde(default)]
    query: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn query_from_params(params: SearchParams) -> Result<String, ApiError> {
    non_blank(params.q)
        .or_else(|| non_blank(params.query))
        .ok_or(ApiError::MissingQuery)
}

/// Bodies that are not a JSON object with a string `query` count as empty.
fn query_from_body(body: &[u8]) -> Result<String, ApiError> {
    let body: SearchBody = serde_json::from_slice(body).unwrap_or_default();
    non_blank(body.query).ok_or(ApiError::MissingQuery)
}

async fn run_search(app_state: &AppState, query: &str) -> Result<SearchResponse, ApiError> {
    Ok(app_state.search.search(query).await?)
}

/// Only the best result, in the shape older clients expect.
async fn compat_search(app_state: &AppState, query: &str) -> Result<Response, ApiError> {
    let response = run_search(app_state, query).await?;
    Ok(match response.to_compat() {
        Some(compat) => Json(compat).into_response(),
        None => Json(response).into_response(),
    })
}

pub async fn search_get(
    State(app_state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let query = query_from_params(params)?;
    compat_search(&app_state, &query).await
}

pub async fn search_post(
    State(app_state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let query = query_from_body(&body?)?;
    compat_search(&app_state, &query).await
}

pub async fn search_detailed_get(
    State(app_state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params?;
    let query = query_from_params(params)?;
    Ok(Json(run_search(&app_state, &query).await?))
}

pub async fn search_detailed_post(
    State(app_state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = query_from_body(&body?)?;
    Ok(Json(run_search(&app_state, &query).await?))
}
