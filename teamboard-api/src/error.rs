/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; `ApiError` maps onto an HTTP status and a
/// JSON body of the form:
///
/// ```json
/// {
///   "error": "not_found",
///   "message": "Project with ID 4 not found",
///   "details": null
/// }
/// ```
///
/// `details` is only present on validation errors and lists every failing
/// field with the constraint it violated.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use teamboard_shared::error::IntegrityViolation;
use teamboard_shared::models::{membership, task, user, user_profile};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): mismatched identifiers, duplicate or absent membership
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409): e-mail already registered, profile already exists
    Conflict(String),

    /// Unprocessable entity (422): payload failed validation
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

impl ApiError {
    /// 404 naming the missing entity
    pub fn not_found(entity: &str, id: i32) -> Self {
        ApiError::NotFound(format!("{} with ID {} not found", entity, id))
    }

    /// 422 for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: field.into(),
            message: message.into(),
        }])
    }
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Constraint that was violated
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Maps a store integrity violation onto the error the client should see
///
/// Handlers check existence and duplicates before writing, so these only fire
/// when a concurrent request changed the store in between.
fn from_integrity_violation(violation: IntegrityViolation) -> ApiError {
    match &violation {
        IntegrityViolation::Duplicate { constraint } => match constraint.as_str() {
            user::EMAIL_UNIQUE_CONSTRAINT => ApiError::Conflict("Email already registered".to_string()),
            user_profile::USER_UNIQUE_CONSTRAINT => {
                ApiError::Conflict("User already has a profile".to_string())
            }
            membership::PRIMARY_KEY_CONSTRAINT => {
                ApiError::BadRequest("User is already a member of this project".to_string())
            }
            other => ApiError::Conflict(format!("Constraint violation: {}", other)),
        },
        IntegrityViolation::MissingReference { constraint } => match constraint.as_str() {
            task::PROJECT_FK_CONSTRAINT | membership::PROJECT_FK_CONSTRAINT => {
                ApiError::NotFound("Project not found".to_string())
            }
            user_profile::USER_FK_CONSTRAINT | membership::USER_FK_CONSTRAINT => {
                ApiError::NotFound("User not found".to_string())
            }
            other => ApiError::BadRequest(format!("Reference violation: {}", other)),
        },
        IntegrityViolation::CheckFailed { constraint } => {
            ApiError::invalid_field("body", format!("Value rejected by constraint {}", constraint))
        }
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(violation) = IntegrityViolation::classify(&err) {
            tracing::debug!(%violation, "Store rejected statement");
            return from_integrity_violation(violation);
        }

        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Flatten validator errors into per-field details
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Failed `{}` check", error.code)),
                })
            })
            .collect();

        // HashMap order is arbitrary; keep responses stable
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError(details)
    }
}
