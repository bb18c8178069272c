//! # Store Commands
//!
//! Whole-store backup, restore and reset.
//!
//! Paths are checked here so a wrong path is a `VALIDATION_ERROR` rather
//! than a database failure.

use std::path::Path;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::DbState;
use stockly_db::TableCounts;

/// Writes a snapshot of the store to `path`, which must not exist yet.
pub async fn backup_store(state: &DbState, path: &Path) -> Result<(), ApiError> {
    let db = state.db()?;
    if path.exists() {
        return Err(ApiError::validation(format!(
            "{} already exists",
            path.display()
        )));
    }

    debug!(path = %path.display(), "backup_store command");
    db.backup_to(path).await?;
    Ok(())
}

/// Replaces the store contents with the backup at `path`.
///
/// A backup that cannot be read in full leaves the store unchanged
/// (`TRANSACTION_ABORTED`).
pub async fn restore_store(state: &DbState, path: &Path) -> Result<TableCounts, ApiError> {
    let db = state.db()?;
    if !path.is_file() {
        return Err(ApiError::validation(format!(
            "backup {} not found",
            path.display()
        )));
    }

    Ok(db.restore_from(path).await?)
}

/// Deletes every category, product and sale. Settings are kept.
pub async fn reset_store(state: &DbState) -> Result<TableCounts, ApiError> {
    let db = state.db()?;
    warn!("Resetting store: all catalog and sales data will be removed");

    Ok(db.reset().await?)
}
