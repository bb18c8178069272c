//! # Database State
//!
//! Wraps the `Database` handle, or the reason there isn't one.
//!
//! ## Degraded Startup
//! ```text
//! DbState::connect(&config)
//!   ├── store opens     → Ready(Database)
//!   └── store fails     → Unavailable(reason), logged at error
//!                          every command → ApiError { CONNECTION_ERROR }
//! ```
//!
//! The process keeps running in both cases.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_products(state: &DbState) -> Result<Vec<Product>, ApiError> {
//!     Ok(state.db()?.products().list().await)
//! }
//! ```

use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppConfig;
use stockly_db::{Database, DbConfig};

#[derive(Debug)]
enum Inner {
    Ready(Database),
    Unavailable(String),
}

/// Database handle shared by every command.
#[derive(Debug)]
pub struct DbState {
    inner: Inner,
}

impl DbState {
    /// Creates a DbState around an open database.
    pub fn new(db: Database) -> Self {
        DbState {
            inner: Inner::Ready(db),
        }
    }

    /// Creates a DbState with no database.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        DbState {
            inner: Inner::Unavailable(reason.into()),
        }
    }

    /// Opens the configured store. Never fails: a store that cannot be opened
    /// leaves the state unavailable.
    pub async fn connect(config: &AppConfig) -> Self {
        match Database::new(DbConfig::new(config.database_path())).await {
            Ok(db) => {
                info!(path = %config.database_path().display(), "Database ready");
                DbState::new(db)
            }
            Err(e) => {
                error!(
                    path = %config.database_path().display(),
                    error = %e,
                    "Database unavailable; running degraded"
                );
                DbState::unavailable(e.to_string())
            }
        }
    }

    /// Returns the database, or `CONNECTION_ERROR` while degraded.
    pub fn db(&self) -> Result<&Database, ApiError> {
        match &self.inner {
            Inner::Ready(db) => Ok(db),
            Inner::Unavailable(_) => Err(ApiError::unavailable()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.inner, Inner::Ready(_))
    }

    /// Why the store is unavailable, if it is.
    pub fn failure(&self) -> Option<&str> {
        match &self.inner {
            Inner::Ready(_) => None,
            Inner::Unavailable(reason) => Some(reason),
        }
    }

    /// Closes the pool, if any.
    pub async fn close(&self) {
        if let Inner::Ready(db) = &self.inner {
            db.close().await;
        }
    }
}
