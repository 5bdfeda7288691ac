// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{generator::GenerationError, publisher::PublishError};

/// Message returned when the model's output cannot be parsed into questions.
pub const FORMAT_ERROR_MESSAGE: &str = "AI JSON format issue";

/// Message returned when the generation service itself fails.
pub const SERVICE_ERROR_MESSAGE: &str = "AI service unavailable";

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 502 Bad Gateway (the upstream model failed or answered garbage)
    BadGateway(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Format(reason) => {
                tracing::warn!("Rejected model output: {}", reason);
                AppError::BadGateway(FORMAT_ERROR_MESSAGE.to_string())
            }
            GenerationError::Service(e) => {
                tracing::error!("Generation call failed: {}", e);
                AppError::BadGateway(SERVICE_ERROR_MESSAGE.to_string())
            }
            GenerationError::IdExhausted(attempts) => AppError::InternalServerError(format!(
                "no free quiz id after {} attempts",
                attempts
            )),
            GenerationError::Storage(e) => AppError::from(e),
        }
    }
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
