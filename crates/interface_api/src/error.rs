//! Failures as HTTP answers
//!
//! Every error body carries a machine-readable `error` tag and a `message`;
//! validation and link failures add `details`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_claims::{ClaimError, LinkPolicyViolation, ValidationFailure};
use infra_db::DatabaseError;

use crate::service::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Rejected request: {0}")]
    BadRequest(String),

    #[error("Conflicting change: {0}")]
    Conflict(String),

    #[error("Unexpected failure: {0}")]
    Internal(String),

    #[error("Storage failure: {0}")]
    Database(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Link policy violation: {0}")]
    LinkPolicy(LinkPolicyViolation),
}

/// JSON body of every non-2xx answer
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None),
            ApiError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error", msg, None),
            ApiError::Validation(messages) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Validation failed".to_string(),
                Some(messages),
            ),
            ApiError::LinkPolicy(violation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "link_policy_violation",
                violation.to_string(),
                Some(vec![violation.code().to_string()]),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        ApiError::Validation(failure.into_messages())
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(failure) => failure.into(),
            ClaimError::LinkPolicy(violation) => ApiError::LinkPolicy(violation),
            conflict @ ClaimError::HasLinkedClaims { .. } => ApiError::Conflict(conflict.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            err if err.is_constraint_violation() => ApiError::Conflict(err.to_string()),
            err => {
                error!(error = %err, "Database failure");
                ApiError::Database(err.to_string())
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Claim(err) => err.into(),
            ServiceError::Database(err) => err.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        DatabaseError::from(&err).into()
    }
}
