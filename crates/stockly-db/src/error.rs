//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized: connection / constraint / ...    │
//! │       │                                                                 │
//! │       ├── inside complete_sale / rename_category?                      │
//! │       │      └── wrapped once in TransactionAborted (first error only) │
//! │       ▼                                                                 │
//! │  ApiError (in app) ← Serialized for the presentation layer             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Silent Not-Found
//! There is deliberately no `NotFound` variant. Updating or deleting an id
//! that does not exist succeeds and changes nothing.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The store could not be opened, or the pool has been closed.
    ///
    /// ## When This Occurs
    /// - Data directory missing or not writable
    /// - File is not a SQLite database
    /// - Operation attempted after `Database::close`
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A write violated a table constraint.
    ///
    /// ## When This Occurs
    /// - Inserting a product with an existing `sku` or `id`
    /// - Inserting a sale with an existing `id`
    /// - `NOT NULL` or foreign key failures
    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// A multi-statement unit failed and was rolled back.
    ///
    /// `source` is the first statement failure; nothing from the unit was
    /// applied.
    #[error("Transaction {operation} aborted: {source}")]
    TransactionAborted {
        operation: &'static str,
        #[source]
        source: Box<DbError>,
    },

    /// Query execution failed for a reason other than a constraint
    /// (missing table, syntax error, trigger abort, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Wraps the first failure of a transactional unit.
    pub fn aborted(operation: &'static str, source: DbError) -> Self {
        DbError::TransactionAborted {
            operation,
            source: Box::new(source),
        }
    }

    /// The underlying failure, looking through `TransactionAborted`.
    pub fn root_cause(&self) -> &DbError {
        match self {
            DbError::TransactionAborted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error (or the failure that aborted a transaction) is a
    /// constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self.root_cause(), DbError::ConstraintViolation { .. })
    }

    /// Whether the store is unreachable.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self.root_cause(),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → ConstraintViolation if SQLite says
///                               "<KIND> constraint failed", else QueryFailed
/// sqlx::Error::PoolTimedOut   → PoolExhausted
/// sqlx::Error::PoolClosed     → ConnectionFailed
/// sqlx::Error::Io / Tls       → ConnectionFailed
/// Other                       → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports constraints as e.g.
                // "UNIQUE constraint failed: products.sku"
                // "FOREIGN KEY constraint failed"
                match msg.split_once(" constraint failed") {
                    Some((kind, _)) => DbError::ConstraintViolation {
                        constraint: kind.trim().to_string(),
                        message: msg.to_string(),
                    },
                    None => DbError::QueryFailed(msg.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            sqlx::Error::Configuration(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_sees_through_abort() {
        let err = DbError::aborted(
            "complete_sale",
            DbError::ConstraintViolation {
                constraint: "UNIQUE".to_string(),
                message: "UNIQUE constraint failed: sales.id".to_string(),
            },
        );

        assert!(err.is_constraint_violation());
        assert!(!err.is_connection_error());
        assert!(matches!(
            err.root_cause(),
            DbError::ConstraintViolation { constraint, .. } if constraint == "UNIQUE"
        ));
        assert_eq!(
            err.to_string(),
            "Transaction complete_sale aborted: Constraint violation (UNIQUE): UNIQUE constraint failed: sales.id"
        );
    }

    #[test]
    fn test_pool_errors_are_connection_errors() {
        assert!(DbError::from(sqlx::Error::PoolClosed).is_connection_error());
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_connection_error());
    }

    #[test]
    fn test_row_not_found_is_internal() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
    }
}
