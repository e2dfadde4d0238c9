//! Error handling module for the center directory.
//!
//! Provides a single error type shared by the sync client and the blob server, with a
//! mapping to HTTP status codes and a JSON response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NETWORK_FAILURE: &str = "NETWORK_FAILURE";
    pub const MALFORMED_REMOTE_DATA: &str = "MALFORMED_REMOTE_DATA";
    pub const MALFORMED_IMPORT_FILE: &str = "MALFORMED_IMPORT_FILE";
    pub const AUTHENTICATION_FAILURE: &str = "AUTHENTICATION_FAILURE";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The remote document could not be reached or rejected the request
    NetworkFailure(String),
    /// The remote document was fetched but does not have the document shape
    MalformedRemoteData(String),
    /// An import file is not JSON or lacks the required fields
    MalformedImportFile(String),
    /// Password mismatch on user or admin login
    AuthenticationFailure(String),
    /// Validation error on user input
    Validation(String),
    /// Entity not found
    NotFound(String),
    /// Local store or blob database error
    Storage(String),
    /// Invalid configuration
    Config(String),
    /// Internal error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NetworkFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedRemoteData(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedImportFile(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NetworkFailure(_) => codes::NETWORK_FAILURE,
            AppError::MalformedRemoteData(_) => codes::MALFORMED_REMOTE_DATA,
            AppError::MalformedImportFile(_) => codes::MALFORMED_IMPORT_FILE,
            AppError::AuthenticationFailure(_) => codes::AUTHENTICATION_FAILURE,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Storage(_) => codes::STORAGE_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NetworkFailure(msg)
            | AppError::MalformedRemoteData(msg)
            | AppError::MalformedImportFile(msg)
            | AppError::AuthenticationFailure(msg)
            | AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Storage(msg)
            | AppError::Config(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Whether the error leaves the locally persisted state authoritative and can be
    /// retried later without user intervention.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::NetworkFailure(_) | AppError::MalformedRemoteData(_)
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Storage(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::warn!("Remote request error: {:?}", err);
        AppError::NetworkFailure(format!("Remote request failed: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Storage(format!("I/O error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
