use axum::{
    Json,
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::search::error::SearchError;
use crate::services::search::types::ErrorResponse;

pub const MISSING_QUERY_MESSAGE: &str = "Query parameter 'q' or 'query' is required";

/// Errors surfaced by the HTTP routes. Every variant renders as an
/// `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", MISSING_QUERY_MESSAGE)]
    MissingQuery,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("Endpoint not found")]
    NotFound,
    #[error("Internal server error: {0}")]
    Internal(String),
    /// An extractor refused the request (bad query string, oversized body).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::Search(SearchError::EmptyQuery) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Search(SearchError::ProviderUnavailable) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("Rejected request: {self}");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Search(SearchError::EmptyQuery).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Search(SearchError::ProviderUnavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::Search(SearchError::EmptyQuery).to_string(), "Query too short");
        assert_eq!(
            ApiError::Internal("boom".to_string()).to_string(),
            "Internal server error: boom"
        );
        assert_eq!(ApiError::MissingQuery.to_string(), MISSING_QUERY_MESSAGE);
    }

    #[test]
    fn test_rejection_keeps_status_and_message() {
        let err = ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "Failed to buffer the request body: length limit exceeded".to_string(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            err.to_string(),
            "Failed to buffer the request body: length limit exceeded"
        );
    }
}
