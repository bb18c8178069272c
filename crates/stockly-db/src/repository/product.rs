//! # Product Repository
//!
//! Single-row CRUD for the product catalog.
//!
//! Stock is also changed by [`SaleRepository::complete_sale`], which
//! decrements it inside the sale transaction.
//!
//! [`SaleRepository::complete_sale`]: crate::repository::sale::SaleRepository::complete_sale

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use stockly_core::Product;

const SELECT_PRODUCTS: &str =
    "SELECT id, name, sku, category, price, stock, createdAt FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// repo.add(&product).await?;
/// let all = repo.list().await;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product in insertion order.
    pub async fn try_list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCTS} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists every product; a failed query yields an empty list.
    pub async fn list(&self) -> Vec<Product> {
        self.try_list().await.unwrap_or_else(|e| {
            warn!(error = %e, "Listing products failed; returning empty list");
            Vec::new()
        })
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCTS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCTS} WHERE sku = ?1"))
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::ConstraintViolation)` - `id` or `sku` already exists;
    ///   the existing row is untouched
    pub async fn add(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, sku = %product.sku, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, sku, category, price, stock, createdAt)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites every mutable column of the product with `product.id`.
    ///
    /// `createdAt` is never changed. An unknown id is a no-op, not an error.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                sku = ?3,
                category = ?4,
                price = ?5,
                stock = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(id = %product.id, "Update matched no product");
        }

        Ok(())
    }

    /// Deletes a product. An unknown id is a no-op, not an error.
    ///
    /// Past sale items keep their product id and name snapshot.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(id = %id, "Delete matched no product");
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
