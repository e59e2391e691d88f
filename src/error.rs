//! Error handling for the service.
//!
//! Every fallible path produces an [`AppError`], which knows its HTTP status
//! mapping and renders as an RFC 7807 Problem Details JSON body. Network
//! failures during probing are deliberately *not* represented here: an
//! unreachable site is data (an offline check result), not a service error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Standard error response format following RFC 7807 Problem Details.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    pub detail: String,

    /// A URI reference that identifies the specific occurrence
    pub instance: String,

    /// Request ID for tracing
    pub request_id: Option<String>,
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration validation failed: {message}")]
    ConfigValidation {
        message: String,
        field: Option<String>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {message}")]
    ConfigParse {
        message: String,
        line: Option<usize>,
    },

    // Storage errors
    #[error("Storage connection failed: {message}")]
    StorageConnection { message: String },

    #[error("Storage operation failed: {operation} - {message}")]
    StorageOperation { operation: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // Request errors
    #[error("Validation failed: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Site not found: {id}")]
    SiteNotFound { id: u64 },

    // System errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("IO operation failed: {operation} - {message}")]
    Io { operation: String, message: String },
}

impl AppError {
    /// Create a new configuration validation error
    pub fn config_validation(message: impl Into<String>, field: Option<impl Into<String>>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
            field: field.map(Into::into),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::Validation { .. } | Self::ConfigParse { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::SiteNotFound { .. } | Self::ConfigNotFound { .. } => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::ConfigValidation { .. }
            | Self::StorageOperation { .. }
            | Self::Serialization { .. }
            | Self::Internal { .. }
            | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,

            // 503 Service Unavailable
            Self::StorageConnection { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error type URI for RFC 7807 compliance
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ConfigValidation { .. } | Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => {
                "https://statuspulse.dev/errors/configuration"
            }
            Self::StorageConnection { .. }
            | Self::StorageOperation { .. }
            | Self::Serialization { .. } => "https://statuspulse.dev/errors/storage",
            Self::Validation { .. } => "https://statuspulse.dev/errors/validation",
            Self::SiteNotFound { .. } => "https://statuspulse.dev/errors/not-found",
            Self::Internal { .. } | Self::Io { .. } => "https://statuspulse.dev/errors/internal",
        }
    }

    /// Get a human-readable title for the error
    pub fn title(&self) -> &'static str {
        match self {
            Self::ConfigValidation { .. } | Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => {
                "Configuration Error"
            }
            Self::StorageConnection { .. }
            | Self::StorageOperation { .. }
            | Self::Serialization { .. } => "Storage Error",
            Self::Validation { .. } => "Validation Error",
            Self::SiteNotFound { .. } => "Site Not Found",
            Self::Internal { .. } | Self::Io { .. } => "Internal Server Error",
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self, request_id: Option<&str>) {
        let request_id = request_id.unwrap_or("unknown");

        if self.status_code().is_server_error() {
            error!(
                error = %self,
                request_id = request_id,
                error_type = self.error_type(),
                "Application error occurred"
            );
        } else {
            warn!(
                error = %self,
                request_id = request_id,
                error_type = self.error_type(),
                "Client error occurred"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();

        self.log(Some(&request_id));

        let status = self.status_code();
        let error_response = ErrorResponse {
            error_type: self.error_type().to_string(),
            title: self.title().to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
            instance: format!("/errors/{request_id}"),
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            operation: "io".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        Self::StorageOperation {
            operation: "redis".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "redis")]
impl From<deadpool_redis::PoolError> for AppError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        Self::StorageConnection {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "redis")]
impl From<deadpool_redis::CreatePoolError> for AppError {
    fn from(err: deadpool_redis::CreatePoolError) -> Self {
        Self::StorageConnection {
            message: err.to_string(),
        }
    }
}

/// Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
