//! # Store Maintenance
//!
//! Backup, restore and reset of the whole store.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Maintenance                                  │
//! │                                                                         │
//! │  backup_to(path)     VACUUM INTO 'path'   (consistent snapshot file)   │
//! │                                                                         │
//! │  restore_from(path)  ATTACH 'path' AS backup                           │
//! │                      BEGIN                                              │
//! │                        DELETE every table (children first)             │
//! │                        INSERT INTO main.t SELECT * FROM backup.t       │
//! │                      COMMIT (any failure → ROLLBACK, store untouched)  │
//! │                      DETACH backup                                      │
//! │                                                                         │
//! │  reset()             BEGIN                                              │
//! │                        DELETE sale_items, sales, products, categories  │
//! │                      COMMIT (any failure → ROLLBACK)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Restore copies rows into the open store instead of swapping the file,
//! so pooled connections keep working and a bad backup leaves the current
//! data in place. Settings survive a reset.

use serde::Serialize;
use sqlx::SqliteConnection;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::transaction;

/// Data tables, parents first.
const DATA_TABLES: [&str; 4] = ["categories", "products", "sales", "sale_items"];

/// Row counts per data table, as removed by a reset or copied by a restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCounts {
    pub categories: u64,
    pub products: u64,
    pub sales: u64,
    pub sale_items: u64,
}

impl TableCounts {
    fn record(&mut self, table: &str, rows: u64) {
        match table {
            "categories" => self.categories = rows,
            "products" => self.products = rows,
            "sales" => self.sales = rows,
            "sale_items" => self.sale_items = rows,
            _ => {}
        }
    }
}

impl Database {
    /// Writes a consistent snapshot of the store to `path`.
    ///
    /// `path` must not exist yet; SQLite refuses to overwrite it.
    pub async fn backup_to(&self, path: &Path) -> DbResult<()> {
        sqlx::query("VACUUM INTO ?1")
            .bind(path.to_string_lossy().into_owned())
            .execute(self.pool())
            .await?;

        info!(path = %path.display(), "Store backed up");
        Ok(())
    }

    /// Replaces every row in the store with the rows of the backup at `path`.
    ///
    /// ## Returns
    /// * `Ok(TableCounts)` - Rows now in the store, per table
    /// * `Err(DbError::ConnectionFailed)` - `path` does not exist
    /// * `Err(DbError::TransactionAborted)` - Backup unreadable or incomplete;
    ///   the store is unchanged
    pub async fn restore_from(&self, path: &Path) -> DbResult<TableCounts> {
        if !path.is_file() {
            return Err(DbError::ConnectionFailed(format!(
                "backup {} does not exist",
                path.display()
            )));
        }

        let mut conn = self.pool().acquire().await?;

        sqlx::query("ATTACH DATABASE ?1 AS backup")
            .bind(path.to_string_lossy().into_owned())
            .execute(&mut *conn)
            .await?;

        let restored = {
            let mut tx = transaction::begin_on(&mut conn, "restore_store").await?;
            let outcome = copy_from_backup(&mut tx).await;
            transaction::finish(tx, "restore_store", outcome).await
        };

        let detached = sqlx::query("DETACH DATABASE backup")
            .execute(&mut *conn)
            .await;
        if let Err(e) = detached {
            warn!(error = %e, "Detaching backup failed; closing the connection");
            drop(conn.detach());
        }

        let counts = restored?;
        info!(
            path = %path.display(),
            products = counts.products,
            sales = counts.sales,
            "Store restored"
        );
        Ok(counts)
    }

    /// Deletes every category, product, sale and sale item as one
    /// transaction. Settings are kept.
    pub async fn reset(&self) -> DbResult<TableCounts> {
        let mut tx = transaction::begin(self.pool(), "reset_store").await?;
        let outcome = clear_data(&mut tx).await;
        let removed = transaction::finish(tx, "reset_store", outcome).await?;

        info!(
            products = removed.products,
            sales = removed.sales,
            "Store reset"
        );
        Ok(removed)
    }
}

async fn clear_data(conn: &mut SqliteConnection) -> DbResult<TableCounts> {
    let mut removed = TableCounts::default();

    for table in DATA_TABLES.iter().rev() {
        let result = sqlx::query(&format!("DELETE FROM main.{table}"))
            .execute(&mut *conn)
            .await?;
        removed.record(table, result.rows_affected());
    }

    Ok(removed)
}

async fn copy_from_backup(conn: &mut SqliteConnection) -> DbResult<TableCounts> {
    clear_data(conn).await?;

    let mut copied = TableCounts::default();
    for table in DATA_TABLES {
        let result = sqlx::query(&format!(
            "INSERT INTO main.{table} SELECT * FROM backup.{table}"
        ))
        .execute(&mut *conn)
        .await?;
        copied.record(table, result.rows_affected());
    }

    // Backups taken before settings existed restore the catalog and sales only.
    let has_settings: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM backup.sqlite_master WHERE type = 'table' AND name = 'settings'",
    )
    .fetch_one(&mut *conn)
    .await?;

    if has_settings > 0 {
        sqlx::query("DELETE FROM main.settings")
            .execute(&mut *conn)
            .await?;
        sqlx::query("INSERT INTO main.settings SELECT * FROM backup.settings")
            .execute(&mut *conn)
            .await?;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use stockly_core::{Category, Product, Sale, SaleItem};

    async fn stocked() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories().save(&Category::new("Drinks")).await.unwrap();

        let cola = Product::new("Cola", "COLA", "Drinks", 5.0, 10);
        db.products().add(&cola).await.unwrap();

        let mut sale = Sale::new("cash");
        sale.items.push(SaleItem::from_product(&cola, 2));
        db.sales().complete_sale(&sale).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_reset_clears_data_keeps_settings() {
        let db = stocked().await;
        db.settings().save_tax_rate(8.0).await.unwrap();

        let removed = db.reset().await.unwrap();

        assert_eq!(
            removed,
            TableCounts {
                categories: 1,
                products: 1,
                sales: 1,
                sale_items: 1
            }
        );
        assert!(db.products().list().await.is_empty());
        assert!(db.sales().list().await.is_empty());
        assert_eq!(db.settings().tax_rate().await.unwrap(), 8.0);
    }

    #[tokio::test]
    async fn test_failed_reset_rolls_back() {
        let db = stocked().await;
        sqlx::query(
            "CREATE TRIGGER no_product_delete BEFORE DELETE ON products \
             BEGIN SELECT RAISE(ABORT, 'forced failure'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.reset().await.unwrap_err();

        assert!(matches!(
            err,
            DbError::TransactionAborted {
                operation: "reset_store",
                ..
            }
        ));
        // sale_items and sales were deleted before the failure and came back.
        assert_eq!(db.sales().count().await.unwrap(), 1);
        assert_eq!(db.sales().list().await[0].items.len(), 1);
        assert_eq!(db.products().count().await.unwrap(), 1);
        assert_eq!(db.categories().list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_backup_then_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backup = dir.path().join("backup.db");

        let db = stocked().await;
        db.settings().save_tax_rate(9.5).await.unwrap();
        db.backup_to(&backup).await.unwrap();
        assert!(backup.is_file());

        db.reset().await.unwrap();
        db.settings().save_tax_rate(1.0).await.unwrap();

        let restored = db.restore_from(&backup).await.unwrap();

        assert_eq!(restored.products, 1);
        assert_eq!(restored.sale_items, 1);
        assert_eq!(db.products().list().await[0].stock, 8);
        assert_eq!(db.sales().list().await[0].items[0].quantity, 2);
        assert_eq!(db.settings().tax_rate().await.unwrap(), 9.5);
    }

    #[tokio::test]
    async fn test_backup_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backup = dir.path().join("backup.db");
        std::fs::write(&backup, b"occupied").unwrap();

        let db = stocked().await;
        assert!(db.backup_to(&backup).await.is_err());
        assert_eq!(std::fs::read(&backup).unwrap(), b"occupied");
    }

    #[tokio::test]
    async fn test_restore_missing_file_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = stocked().await;

        let err = db
            .restore_from(&dir.path().join("nope.db"))
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
        assert!(!dir.path().join("nope.db").exists());
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_restore_from_incomplete_backup_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("partial.db");

        // A store that only has a categories table.
        let other = Database::new(DbConfig::new(&partial).ensure_schema(false))
            .await
            .unwrap();
        sqlx::query("CREATE TABLE categories (id TEXT PRIMARY KEY, name TEXT, description TEXT, createdAt TEXT)")
            .execute(other.pool())
            .await
            .unwrap();
        other.close().await;

        let db = stocked().await;
        let err = db.restore_from(&partial).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::TransactionAborted {
                operation: "restore_store",
                ..
            }
        ));
        assert_eq!(db.products().count().await.unwrap(), 1);
        assert_eq!(db.sales().list().await[0].items.len(), 1);

        // The connection is clean again: a real restore still works.
        let backup = dir.path().join("backup.db");
        db.backup_to(&backup).await.unwrap();
        assert_eq!(db.restore_from(&backup).await.unwrap().sales, 1);
    }
}
