//! Error types for the offer API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Offer letter not yet available")]
    LetterNotReady,

    #[error("Offer letter file missing")]
    LetterFileMissing,

    #[error("Payment required to download")]
    PaymentRequired,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::OfferNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Offer not found: {}", id))
            }
            // Distinct from a server error: generation is best-effort and
            // this offer simply has no letter artifact
            ApiError::LetterNotReady => (
                StatusCode::NOT_FOUND,
                "Offer letter not yet available".to_string(),
            ),
            ApiError::LetterFileMissing => {
                (StatusCode::NOT_FOUND, "PDF file not found".to_string())
            }
            ApiError::PaymentRequired => (
                StatusCode::FORBIDDEN,
                "Payment required to download".to_string(),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
