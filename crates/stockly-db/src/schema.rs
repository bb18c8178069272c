//! # Schema Store
//!
//! Creates the Stockly tables on every startup.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Bootstrap                                   │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  For each statement (CREATE ... IF NOT EXISTS):                        │
//! │       │                                                                 │
//! │       ├── ok?     → applied += 1                                        │
//! │       └── failed? → error! log + recorded in SchemaReport              │
//! │                     (startup continues; queries against that table     │
//! │                      fail individually later)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SchemaReport returned to the caller                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Layout
//! Column names are camelCase, matching the entity wire format.
//! `sale_items` uses an AUTOINCREMENT key so items read back in the order
//! they were written. `settings` is a key/value table for store preferences.
//!
//! There is no migration history table: every statement is safe to repeat,
//! and a schema change ships together with the code that needs it.

use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};

/// Tables owned by the schema store, in creation order.
pub const TABLES: [&str; 5] = ["categories", "products", "sales", "sale_items", "settings"];

const STATEMENTS: [(&str, &str); 7] = [
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            createdAt TEXT
        )
        "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            sku TEXT UNIQUE NOT NULL,
            category TEXT,
            price REAL,
            stock INTEGER,
            createdAt TEXT
        )
        "#,
    ),
    (
        "sales",
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id TEXT PRIMARY KEY,
            subtotal REAL,
            tax REAL,
            taxRate REAL,
            total REAL,
            paymentMethod TEXT,
            amountTendered REAL,
            changeDue REAL,
            createdAt TEXT
        )
        "#,
    ),
    (
        "sale_items",
        r#"
        CREATE TABLE IF NOT EXISTS sale_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            saleId TEXT,
            productId TEXT,
            productName TEXT,
            quantity INTEGER,
            price REAL,
            FOREIGN KEY(saleId) REFERENCES sales(id)
        )
        "#,
    ),
    (
        "settings",
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    ),
    (
        "idx_sale_items_sale",
        "CREATE INDEX IF NOT EXISTS idx_sale_items_sale ON sale_items(saleId)",
    ),
    (
        "idx_products_category",
        "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)",
    ),
];

/// A schema statement that failed to apply.
#[derive(Debug)]
pub struct SchemaFailure {
    /// Table or index the statement creates.
    pub object: &'static str,
    pub error: DbError,
}

/// Outcome of [`ensure_schema`].
#[derive(Debug, Default)]
pub struct SchemaReport {
    pub applied: usize,
    pub failures: Vec<SchemaFailure>,
}

impl SchemaReport {
    /// True when every statement applied.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ensures every table and index exists.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Never aborts: a failed statement is logged and the rest still run
pub async fn ensure_schema(pool: &SqlitePool) -> SchemaReport {
    let mut report = SchemaReport::default();

    for (object, sql) in STATEMENTS {
        match sqlx::query(sql).execute(pool).await {
            Ok(_) => {
                debug!(object, "Schema object ensured");
                report.applied += 1;
            }
            Err(e) => {
                let error = DbError::from(e);
                error!(object, error = %error, "Error creating schema object");
                report.failures.push(SchemaFailure { object, error });
            }
        }
    }

    info!(
        applied = report.applied,
        failed = report.failures.len(),
        "Schema bootstrap finished"
    );
    report
}

/// Lists user tables present in the store, sorted by name.
///
/// ## Usage
/// Diagnostics and health checks.
pub async fn table_names(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let names = table_names(db.pool()).await.unwrap();
        for table in TABLES {
            assert!(names.iter().any(|n| n == table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let before = table_names(db.pool()).await.unwrap();

        let first = ensure_schema(db.pool()).await;
        let second = ensure_schema(db.pool()).await;

        assert!(first.is_complete());
        assert!(second.is_complete());
        assert_eq!(second.applied, STATEMENTS.len());
        assert_eq!(table_names(db.pool()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failures_are_reported_not_raised() {
        let db = Database::new(DbConfig::in_memory().ensure_schema(false))
            .await
            .unwrap();
        db.close().await;

        let report = ensure_schema(db.pool()).await;
        assert_eq!(report.applied, 0);
        assert_eq!(report.failures.len(), STATEMENTS.len());
        assert!(report.failures[0].error.is_connection_error());
    }
}
