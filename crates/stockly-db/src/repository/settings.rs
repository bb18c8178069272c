//! # Settings Repository
//!
//! Store preferences kept in the `settings` key/value table.
//!
//! Values are stored as text. A missing or unreadable value falls back to
//! the built-in default, so a fresh store behaves the same as one that
//! never saved anything.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use stockly_core::DEFAULT_TAX_RATE;

/// Key of the checkout tax rate (percent).
pub const TAX_RATE_KEY: &str = "tax_rate";

/// Repository for store settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Reads a raw setting.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Inserts or overwrites a raw setting.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, value = %value, "Saving setting");

        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The saved checkout tax rate, or `DEFAULT_TAX_RATE` when none is saved.
    pub async fn tax_rate(&self) -> DbResult<f64> {
        let Some(raw) = self.get(TAX_RATE_KEY).await? else {
            return Ok(DEFAULT_TAX_RATE);
        };

        match raw.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() => Ok(rate),
            _ => {
                warn!(value = %raw, "Stored tax rate is not a number; using default");
                Ok(DEFAULT_TAX_RATE)
            }
        }
    }

    /// Saves the checkout tax rate. Range checks belong to the caller.
    pub async fn save_tax_rate(&self, rate: f64) -> DbResult<()> {
        self.set(TAX_RATE_KEY, &rate.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_tax_rate_defaults_when_unset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(db.settings().tax_rate().await.unwrap(), DEFAULT_TAX_RATE);
    }

    #[tokio::test]
    async fn test_save_tax_rate_overwrites() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings();

        settings.save_tax_rate(7.5).await.unwrap();
        settings.save_tax_rate(8.25).await.unwrap();

        assert_eq!(settings.tax_rate().await.unwrap(), 8.25);
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_garbage_tax_rate_falls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.settings().set(TAX_RATE_KEY, "twelve").await.unwrap();

        assert_eq!(db.settings().tax_rate().await.unwrap(), DEFAULT_TAX_RATE);
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db.settings().tax_rate().await.unwrap_err();
        assert!(err.is_connection_error());
    }
}
