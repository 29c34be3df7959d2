// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Underlying cause; absent for Not Found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Global Application Error Enum.
/// Every handler converts its own failures into one of these variants.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request, with the underlying cause passed through
    BadRequest { message: String, error: String },

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error, with the underlying cause passed through
    InternalServerError { message: String, error: String },
}

impl AppError {
    pub fn bad_request(message: &str, error: impl fmt::Display) -> Self {
        AppError::BadRequest {
            message: message.to_string(),
            error: error.to_string(),
        }
    }

    pub fn internal(message: &str, error: impl fmt::Display) -> Self {
        AppError::InternalServerError {
            message: message.to_string(),
            error: error.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        AppError::NotFound(message.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest { message, error }
            | AppError::InternalServerError { message, error } => {
                write!(f, "{}: {}", message, error)
            }
            AppError::NotFound(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Not Found carries only a message; the other variants also expose the cause.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest { message, error } => {
                tracing::warn!("{}: {}", message, error);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        message,
                        error: Some(error),
                    },
                )
            }
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message,
                    error: None,
                },
            ),
            AppError::InternalServerError { message, error } => {
                tracing::error!("{}: {}", message, error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message,
                        error: Some(error),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
