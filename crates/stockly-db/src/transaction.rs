//! # Transactional Units
//!
//! Scoped transactions for operations that span several statements.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Transactional Unit                               │
//! │                                                                         │
//! │  let mut tx = begin(pool, "complete_sale").await?;                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  let outcome = write_statements(&mut tx).await;   ← stops at 1st error │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  finish(tx, "complete_sale", outcome).await                            │
//! │       ├── Ok  → COMMIT   (commit failure → TransactionAborted)         │
//! │       └── Err → ROLLBACK → TransactionAborted { source: first error }  │
//! │                                                                         │
//! │  Early return / panic before finish():                                 │
//! │       sqlx::Transaction is dropped → ROLLBACK is issued on the         │
//! │       connection before it goes back to the pool.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `finish` takes the transaction by value, so commit or rollback runs
//! exactly once.

use sqlx::{Connection, Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Opens a transaction on a pooled connection.
///
/// Failing here means nothing was started, so the error is returned as-is
/// (usually `ConnectionFailed` or `PoolExhausted`).
pub(crate) async fn begin(
    pool: &SqlitePool,
    operation: &'static str,
) -> DbResult<Transaction<'static, Sqlite>> {
    let tx = pool.begin().await?;
    debug!(operation, "Transaction started");
    Ok(tx)
}

/// Opens a transaction on a connection the caller already holds.
///
/// Used when the unit depends on per-connection state such as an attached
/// database.
pub(crate) async fn begin_on<'c>(
    conn: &'c mut SqliteConnection,
    operation: &'static str,
) -> DbResult<Transaction<'c, Sqlite>> {
    let tx = conn.begin().await?;
    debug!(operation, "Transaction started");
    Ok(tx)
}

/// Commits the unit if `outcome` is `Ok`, otherwise rolls it back and
/// surfaces the first failure wrapped in `DbError::TransactionAborted`.
pub(crate) async fn finish<'c, T>(
    tx: Transaction<'c, Sqlite>,
    operation: &'static str,
    outcome: DbResult<T>,
) -> DbResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| DbError::aborted(operation, e.into()))?;
            debug!(operation, "Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(
                    operation,
                    error = %rollback_err,
                    "Explicit rollback failed; dropping the connection discards the transaction"
                );
            }
            warn!(operation, error = %err, "Transaction rolled back");
            Err(DbError::aborted(operation, err))
        }
    }
}
