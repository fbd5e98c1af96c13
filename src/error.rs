// Error handling module for the Menu API
// Maps catalog errors and request rejections onto HTTP responses

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use crate::catalog::error::{CatalogError, FieldError};
use crate::query::QueryError;

/// Main error type for the API
/// All handlers return Result<T, ApiError>
#[derive(Debug)]
pub enum ApiError {
    /// Field-level validation failures
    /// Maps to HTTP 400 Bad Request
    ValidationError(Vec<FieldError>),

    /// The request could not be parsed (body, path or query string)
    /// Maps to HTTP 400 Bad Request
    BadRequest(String),

    /// An item's subcategory belongs to a different category
    /// Maps to HTTP 400 Bad Request
    InvalidReference(String),

    /// A referenced parent record does not exist
    /// Maps to HTTP 404 Not Found
    ParentNotFound(String),

    /// Resource not found by id or name
    /// Maps to HTTP 404 Not Found
    NotFound { resource: String, identifier: String },

    /// Storage backend failures
    /// Maps to HTTP 500, details stay in the logs
    DatabaseError(String),
}

/// Consistent error response structure
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "NOT_FOUND")
    #[schema(example = "VALIDATION_ERROR")]
    pub error_code: String,

    /// Human-readable error message
    pub message: String,

    /// Field-level errors, omitted from JSON when None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,

    /// RFC 3339 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(error_code: &str, message: String) -> Self {
        Self {
            error_code: error_code.to_string(),
            message,
            details: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.to_error_response();
        (status, Json(error_response)).into_response()
    }
}

impl ApiError {
    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Client errors are logged at debug or warn level. Server errors are
    /// logged in full at error level and replaced by a generic message.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);

                let mut response = ErrorResponse::new(
                    "VALIDATION_ERROR",
                    "Request validation failed".to_string(),
                );
                response.details = Some(errors.clone());
                (StatusCode::BAD_REQUEST, response)
            }
            ApiError::BadRequest(message) => {
                debug!("Malformed request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("VALIDATION_ERROR", message.clone()),
                )
            }
            ApiError::InvalidReference(message) => {
                warn!("Invalid reference: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("INVALID_REFERENCE", message.clone()),
                )
            }
            ApiError::ParentNotFound(message) => {
                warn!("Parent not found: {}", message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("PARENT_NOT_FOUND", message.clone()),
                )
            }
            ApiError::NotFound {
                resource,
                identifier,
            } => {
                debug!("Resource not found: {} {}", resource, identifier);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(
                        "NOT_FOUND",
                        format!("{} '{}' not found", resource, identifier),
                    ),
                )
            }
            ApiError::DatabaseError(db_error) => {
                error!("Database error: {}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("DATABASE_ERROR", "A database error occurred".to_string()),
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            ApiError::ParentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => ApiError::ValidationError(errors),
            err @ CatalogError::ParentNotFound { .. } => ApiError::ParentNotFound(err.to_string()),
            err @ CatalogError::InvalidReference { .. } => {
                ApiError::InvalidReference(err.to_string())
            }
            CatalogError::NotFound {
                resource,
                identifier,
            } => ApiError::NotFound {
                resource: resource.to_string(),
                identifier,
            },
            CatalogError::Storage(message) => ApiError::DatabaseError(message),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::BadRequest(err.message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
