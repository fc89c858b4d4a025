//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the user profile passthrough and the
//! game statistics endpoint.

pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::calculate::AggregateError;
use crate::fetch::FetchError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("user_not_found")]
    UserNotFound,

    #[error("no_games_found")]
    NoGamesFound,

    #[error("{0}")]
    Internal(String),
}

/// Error response body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UserNotFound | ApiError::NoGamesFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::UserNotFound => ApiError::UserNotFound,
            FetchError::NoGames => ApiError::NoGamesFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/user/:username", axum::routing::get(routes::profile::user_profile))
        .route("/api/stats/:username", axum::routing::get(routes::stats::user_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_wire_format() {
        assert_eq!(ApiError::UserNotFound.to_string(), "user_not_found");
        assert_eq!(ApiError::NoGamesFound.to_string(), "no_games_found");
    }

    #[test]
    fn test_fetch_error_mapping() {
        assert!(matches!(
            ApiError::from(FetchError::UserNotFound),
            ApiError::UserNotFound
        ));
        assert!(matches!(
            ApiError::from(FetchError::NoGames),
            ApiError::NoGamesFound
        ));
        assert!(matches!(
            ApiError::from(FetchError::HttpStatus {
                status: 503,
                message: "Service Unavailable".to_string()
            }),
            ApiError::Internal(_)
        ));
    }
}
