//! # API Error Type
//!
//! Unified error type for Stockly commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockly                                │
//! │                                                                         │
//! │  Command Function  → Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError  ─────────────► VALIDATION_ERROR           │
//! │         ├── DbError::ConnectionFailed ────► CONNECTION_ERROR           │
//! │         ├── DbError::PoolExhausted ───────► CONNECTION_ERROR           │
//! │         ├── DbError::ConstraintViolation ─► CONSTRAINT_VIOLATION       │
//! │         ├── DbError::TransactionAborted ──► TRANSACTION_ABORTED        │
//! │         ├── DbError::QueryFailed/Internal ► DATABASE_ERROR (logged)    │
//! │         └── CoreError::Export ────────────► INTERNAL (logged)          │
//! │                                                                         │
//! │  Serialized for the caller:                                            │
//! │  { "code": "CONSTRAINT_VIOLATION", "message": "..." }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw SQLite messages go to the log, not into `message`.

use serde::Serialize;
use stockly_core::{CoreError, ValidationError};
use stockly_db::DbError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "TRANSACTION_ABORTED",
///   "message": "complete_sale was rolled back"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Store unreachable, or the app started without one
    ConnectionError,

    /// A write broke a uniqueness or reference rule
    ConstraintViolation,

    /// A multi-statement operation was rolled back
    TransactionAborted,

    /// Input validation failed
    ValidationError,

    /// Any other database failure
    DatabaseError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The error every command returns while the app runs without a store.
    pub fn unavailable() -> Self {
        ApiError::new(ErrorCode::ConnectionError, "Database unavailable")
    }
}

/// Describes a constraint failure without echoing the raw driver message.
///
/// SQLite names the offending column after a colon:
/// `UNIQUE constraint failed: products.sku`.
fn describe_constraint(constraint: &str, message: &str) -> String {
    match message.split_once(": ") {
        Some((_, column)) => format!("{} constraint violated on {}", constraint, column),
        None => format!("{} constraint violated", constraint),
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::unavailable()
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::ConnectionError, "Database pool exhausted")
            }
            DbError::ConstraintViolation {
                constraint,
                message,
            } => ApiError::new(
                ErrorCode::ConstraintViolation,
                describe_constraint(&constraint, &message),
            ),
            DbError::TransactionAborted { operation, source } => {
                tracing::error!(operation, "Transaction aborted: {}", source);
                let reason = match source.root_cause() {
                    DbError::ConstraintViolation {
                        constraint,
                        message,
                    } => describe_constraint(constraint, message),
                    DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                        "database unavailable".to_string()
                    }
                    _ => "a statement failed".to_string(),
                };
                ApiError::new(
                    ErrorCode::TransactionAborted,
                    format!("{} was rolled back: {}", operation, reason),
                )
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            CoreError::Export(e) => {
                tracing::error!("Export failed: {}", e);
                ApiError::internal("Export failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
