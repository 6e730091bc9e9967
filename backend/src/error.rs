//! Error handling for AgroSage
//!
//! Every recommendation failure is surfaced to the caller as one of these
//! variants. None of them is ever replaced by a placeholder recommendation.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{InputError, ReplyError, SchemaError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Pipeline errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid Gemini API Key. Please check your configuration.")]
    InvalidCredential(String),

    #[error("Gemini API error: {0}")]
    Remote(String),

    #[error("AI returned malformed JSON. Raw response: {excerpt}...")]
    MalformedResponse { excerpt: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::Validation {
            field: e.field.to_string(),
            message: e.message.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            field: "body".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<ReplyError> for AppError {
    fn from(e: ReplyError) -> Self {
        match e {
            ReplyError::Malformed { excerpt } => AppError::MalformedResponse { excerpt },
            ReplyError::Schema(schema) => AppError::Schema(schema),
        }
    }
}

impl AppError {
    /// Stable machine-readable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::InvalidCredential(_) => "INVALID_CREDENTIAL",
            AppError::Remote(_) => "REMOTE_ERROR",
            AppError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            AppError::Schema(_) => "SCHEMA_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            AppError::Remote(_) | AppError::MalformedResponse { .. } | AppError::Schema(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error came out of the recommendation pipeline
    fn is_pipeline_failure(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_)
                | AppError::InvalidCredential(_)
                | AppError::Remote(_)
                | AppError::MalformedResponse { .. }
                | AppError::Schema(_)
        )
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let field = match &self {
            AppError::Validation { field, .. } => Some(field.clone()),
            AppError::Schema(e) => Some(e.field.to_string()),
            _ => None,
        };

        let message = match &self {
            AppError::Validation { message, .. } => message.clone(),
            e if e.is_pipeline_failure() => format!("Failed to get recommendation: {}", e),
            e => e.to_string(),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                field,
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
