//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::domain::{AmountError, DomainError};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for a value outside the column's NUMERIC range
const NUMERIC_OUT_OF_RANGE: &str = "22003";

fn sqlstate_is(err: &sqlx::Error, code: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(code))
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("User with ID {0} not found.")]
    UserNotFound(i64),

    #[error("Lender with ID {0} not found.")]
    LenderNotFound(i64),

    #[error("Borrower with ID {0} not found.")]
    BorrowerNotFound(i64),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Map a unique-constraint violation to `Conflict`, pass anything else through.
    pub fn from_insert(err: sqlx::Error, conflict_message: &str) -> Self {
        if sqlstate_is(&err, UNIQUE_VIOLATION) {
            AppError::Conflict(conflict_message.to_string())
        } else {
            AppError::Database(err)
        }
    }

    /// Map a wallet write that overflows the balance column to `BadRequest`.
    pub fn from_wallet_write(err: sqlx::Error) -> Self {
        if sqlstate_is(&err, NUMERIC_OUT_OF_RANGE) {
            AppError::BadRequest("Wallet balance out of range".to_string())
        } else {
            AppError::Database(err)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound(_)
            | AppError::LenderNotFound(_)
            | AppError::BorrowerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Domain(err) if err.is_forbidden() => StatusCode::FORBIDDEN,
            AppError::Domain(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(msg) | AuthError::Signing(msg) => AppError::Internal(msg),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error_code, details) = match &self {
            AppError::Validation(msg) => ("validation_error", Some(msg.clone())),
            AppError::BadRequest(msg) => ("bad_request", Some(msg.clone())),
            AppError::Unauthorized(msg) => ("unauthorized", Some(msg.clone())),
            AppError::Forbidden(msg) => ("forbidden", Some(msg.clone())),
            AppError::UserNotFound(id) => ("user_not_found", Some(id.to_string())),
            AppError::LenderNotFound(id) => ("lender_not_found", Some(id.to_string())),
            AppError::BorrowerNotFound(id) => ("borrower_not_found", Some(id.to_string())),
            AppError::Conflict(msg) => ("conflict", Some(msg.clone())),

            AppError::Domain(domain_err) => match domain_err {
                DomainError::InsufficientFunds {
                    party,
                    required,
                    available,
                } => (
                    "insufficient_funds",
                    Some(format!(
                        "{}: required {}, available {}",
                        party.as_str(),
                        required,
                        available
                    )),
                ),
                DomainError::InvalidTransactionType(kind) => {
                    ("invalid_transaction_type", Some(kind.clone()))
                }
                DomainError::InvalidAmount(msg) => ("invalid_amount", Some(msg.clone())),
                DomainError::SameParty => ("same_party", None),
            },

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ("database_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                ("config_error", None)
            }
        };

        // Server-side failures never echo their cause to the caller.
        let error = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Party;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::LenderNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BorrowerNotFound(2).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_status_mapping() {
        let short = AppError::Domain(DomainError::insufficient_funds(Party::Lender, dec!(40), dec!(0)));
        assert_eq!(short.status_code(), StatusCode::FORBIDDEN);

        let bad_type = AppError::Domain(DomainError::InvalidTransactionType("GIFT".into()));
        assert_eq!(bad_type.status_code(), StatusCode::FORBIDDEN);

        let bad_amount: AppError = AmountError::NotPositive(dec!(0)).into();
        assert_eq!(bad_amount.status_code(), StatusCode::BAD_REQUEST);

        let same = AppError::Domain(DomainError::SameParty);
        assert_eq!(same.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(AppError::LenderNotFound(3).to_string(), "Lender with ID 3 not found.");
        assert_eq!(AppError::UserNotFound(9).to_string(), "User with ID 9 not found.");
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: AppError = AuthError::InvalidToken.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: AppError = AuthError::Hashing("salt".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = AppError::from_wallet_write(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));

        let err = AppError::from_insert(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Conflict("Email or name already exists.".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
