use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::recommendation::engine::RecommendError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Recommendation(#[from] RecommendError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Recommendation(RecommendError::PrerequisiteMissing) => (
                StatusCode::CONFLICT,
                "INTEREST_ASSESSMENT_REQUIRED",
                "Complete the interest assessment to receive a career recommendation".to_string(),
            ),
            AppError::Recommendation(e @ RecommendError::Unresolvable(_)) => {
                tracing::error!("{e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RECOMMENDATION_UNRESOLVABLE",
                    "Unable to calculate career recommendation".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
