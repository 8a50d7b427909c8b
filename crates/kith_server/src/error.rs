//! Server error types

use axum::response::{IntoResponse, Response};
use miette::{Diagnostic, JSONReportHandler};

use kith_core::{CoreError, StoreError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can abort server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error surface returned to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    InvalidId { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("User {resource_id} not found")]
    NotFound { resource_id: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    PartialFailure { message: String, json: String },

    #[error("{message}")]
    Store { message: String, json: String },
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidId { .. } => 400,
            ApiError::Validation { .. } => 400,
            ApiError::NotFound { .. } => 404,
            ApiError::Conflict { .. } => 409,
            ApiError::PartialFailure { .. } => 500,
            ApiError::Store { .. } => 500,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidId { .. } => "invalid_id",
            ApiError::Validation { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } => "conflict",
            ApiError::PartialFailure { .. } => "partial_failure",
            ApiError::Store { .. } => "store_error",
        }
    }
}

/// Render a core error's full diagnostic chain as JSON for the response
/// detail field.
fn diagnostic_json(err: CoreError) -> String {
    let handler = JSONReportHandler::new();
    let mut json = String::new();
    let err: Box<dyn Diagnostic> = Box::new(err);
    handler
        .render_report(&mut json, err.as_ref())
        .unwrap_or_default();
    json
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidId { .. } => ApiError::InvalidId { message },
            CoreError::InvalidArgument { .. } => ApiError::Validation { message },
            CoreError::UserNotFound { id, .. } => ApiError::NotFound {
                resource_id: id.to_string(),
            },
            CoreError::Conflict { .. } => ApiError::Conflict { message },
            err @ CoreError::PartialFriendship { .. } => ApiError::PartialFailure {
                message,
                json: diagnostic_json(err),
            },
            err @ CoreError::Store { .. } => ApiError::Store {
                message,
                json: diagnostic_json(err),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let error_message = self.to_string();
        let error_type = self.error_type();

        let detail = match &self {
            ApiError::PartialFailure { json, .. } => Some(json),
            ApiError::Store { json, .. } => Some(json),
            _ => None,
        };

        let mut error_obj = serde_json::json!({
            "type": error_type,
            "message": error_message,
        });
        if let Some(d) = detail {
            error_obj["detail"] = serde_json::to_value(d).unwrap_or_default();
        }

        let body = serde_json::json!({
            "error": error_obj,
            "timestamp": chrono::Utc::now(),
        });

        (status, Json(body)).into_response()
    }
}
