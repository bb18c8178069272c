//! # Sale Repository
//!
//! The sale transaction manager and the read side for sale history.
//!
//! ## Completing a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    complete_sale(&sale)                                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO sales (header)                                          │
//! │    for item in sale.items (in order):                                  │
//! │        INSERT INTO sale_items (...)                                    │
//! │        UPDATE products SET stock = COALESCE(stock, 0) - qty            │
//! │            WHERE id = productId                                        │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any statement fails → ROLLBACK → TransactionAborted(first failure)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is not checked before the decrement, so overselling drives it
//! negative. A `productId` that matches no product decrements nothing and
//! the sale still commits.
//!
//! The decrement is written `COALESCE(stock, 0) - qty` rather than
//! `stock - qty`. The `stock` column is nullable in the schema while
//! `Product.stock` is an `i64`, and a NULL left in place would make every
//! later product listing fail to decode. A NULL stock is therefore treated
//! as zero and ends up at `-qty`.
//!
//! ## Reading History
//! `list` reads the headers, then the items of each sale (1 + N queries).
//! A sale whose items cannot be read is returned with no items.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::transaction;
use stockly_core::{Sale, SaleItem};

const SELECT_SALES: &str = "SELECT id, subtotal, tax, taxRate, total, paymentMethod, \
     amountTendered, changeDue, createdAt FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Persists a sale, its items and the matching stock decrements as one
    /// transaction.
    ///
    /// Totals are stored exactly as given. An empty `items` list stores the
    /// header alone.
    ///
    /// ## Returns
    /// * `Ok(())` - Committed
    /// * `Err(DbError::TransactionAborted)` - Rolled back; neither the sale,
    ///   its items, nor any stock level changed
    pub async fn complete_sale(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, items = sale.items.len(), "Completing sale");

        let mut tx = transaction::begin(&self.pool, "complete_sale").await?;
        let outcome = write_sale(&mut tx, sale).await;
        transaction::finish(tx, "complete_sale", outcome).await?;

        info!(
            id = %sale.id,
            items = sale.items.len(),
            total = sale.total,
            payment_method = %sale.payment_method,
            "Sale completed"
        );
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Reads every sale header, without items, in insertion order.
    pub async fn try_list_headers(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALES} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Reads the items of one sale in the order they were written.
    pub async fn items_for(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT productId, productName, quantity, price
            FROM sale_items
            WHERE saleId = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists every sale with its items.
    ///
    /// ## Partial Results
    /// - Header read fails → empty list
    /// - Item read fails for one sale → that sale comes back with no items
    pub async fn list(&self) -> Vec<Sale> {
        let mut sales = match self.try_list_headers().await {
            Ok(sales) => sales,
            Err(e) => {
                warn!(error = %e, "Listing sales failed; returning empty list");
                return Vec::new();
            }
        };

        for sale in &mut sales {
            sale.items = self.items_or_empty(&sale.id).await;
        }

        debug!(count = sales.len(), "Listed sales");
        sales
    }

    /// Gets a sale with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALES} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match sale {
            Some(mut sale) => {
                sale.items = self.items_for(&sale.id).await?;
                Ok(Some(sale))
            }
            None => Ok(None),
        }
    }

    /// Counts sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn items_or_empty(&self, sale_id: &str) -> Vec<SaleItem> {
        self.items_for(sale_id).await.unwrap_or_else(|e| {
            warn!(sale_id = %sale_id, error = %e, "Reading sale items failed; returning sale without items");
            Vec::new()
        })
    }
}

/// Writes the header, then each item followed by its stock decrement.
/// Stops at the first failing statement.
async fn write_sale(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO sales (
            id, subtotal, tax, taxRate, total, paymentMethod,
            amountTendered, changeDue, createdAt
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&sale.id)
    .bind(sale.subtotal)
    .bind(sale.tax)
    .bind(sale.tax_rate)
    .bind(sale.total)
    .bind(&sale.payment_method)
    .bind(sale.amount_tendered)
    .bind(sale.change_due)
    .bind(&sale.created_at)
    .execute(&mut *conn)
    .await?;

    for item in &sale.items {
        sqlx::query(
            r#"
            INSERT INTO sale_items (saleId, productId, productName, quantity, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(&item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *conn)
        .await?;

        decrement_stock(conn, &item.product_id, item.quantity).await?;
    }

    Ok(())
}

async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: &str,
    quantity: i64,
) -> DbResult<()> {
    let remaining: Option<i64> = sqlx::query_scalar(
        "UPDATE products SET stock = COALESCE(stock, 0) - ?1 WHERE id = ?2 RETURNING stock",
    )
    .bind(quantity)
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?;

    match remaining {
        None => warn!(product_id = %product_id, "Sold item references no product; stock unchanged"),
        Some(stock) if stock < 0 => {
            warn!(product_id = %product_id, stock, "Product oversold; stock is negative")
        }
        Some(stock) => debug!(product_id = %product_id, stock, "Stock decremented"),
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
