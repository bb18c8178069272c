//! # Category Repository
//!
//! Category CRUD plus the transactional rename.
//!
//! ## Rename Cascade
//! ```text
//! rename("Drinks", "Beverages")
//!   BEGIN
//!     UPDATE categories SET name = 'Beverages' WHERE name = 'Drinks'
//!     UPDATE products   SET category = 'Beverages' WHERE category = 'Drinks'
//!   COMMIT  (either statement fails → ROLLBACK, nothing renamed)
//! ```

use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::transaction;
use stockly_core::Category;

const SELECT_CATEGORIES: &str = "SELECT id, name, description, createdAt FROM categories";

/// Rows touched by a category rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOutcome {
    pub categories: u64,
    pub products: u64,
}

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category in insertion order.
    pub async fn try_list(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORIES} ORDER BY rowid"))
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Lists every category; a failed query yields an empty list.
    pub async fn list(&self) -> Vec<Category> {
        self.try_list().await.unwrap_or_else(|e| {
            warn!(error = %e, "Listing categories failed; returning empty list");
            Vec::new()
        })
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORIES} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// Inserts the category, or replaces the row with the same id.
    ///
    /// Replacing does not touch products: use [`rename`](Self::rename) to
    /// change a name that products already carry.
    pub async fn save(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Saving category");

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO categories (id, name, description, createdAt)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Renames every category called `old_name` and relabels its products,
    /// as one transaction.
    ///
    /// ## Returns
    /// * `Ok(RenameOutcome)` - Committed (zero counts when nothing matched)
    /// * `Err(DbError::TransactionAborted)` - Rolled back; no row changed
    pub async fn rename(&self, old_name: &str, new_name: &str) -> DbResult<RenameOutcome> {
        let mut tx = transaction::begin(&self.pool, "rename_category").await?;
        let outcome = relabel(&mut tx, old_name, new_name).await;
        let outcome = transaction::finish(tx, "rename_category", outcome).await?;

        info!(
            from = %old_name,
            to = %new_name,
            categories = outcome.categories,
            products = outcome.products,
            "Category renamed"
        );
        Ok(outcome)
    }

    /// Deletes a category. Products keep their label.
    ///
    /// An unknown id is a no-op, not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(id = %id, "Delete matched no category");
        }

        Ok(())
    }
}

async fn relabel(
    conn: &mut SqliteConnection,
    old_name: &str,
    new_name: &str,
) -> DbResult<RenameOutcome> {
    let categories = sqlx::query("UPDATE categories SET name = ?1 WHERE name = ?2")
        .bind(new_name)
        .bind(old_name)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let products = sqlx::query("UPDATE products SET category = ?1 WHERE category = ?2")
        .bind(new_name)
        .bind(old_name)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(RenameOutcome {
        categories,
        products,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockly_core::Product;

    fn drinks() -> Category {
        Category {
            id: "c1".to_string(),
            name: "Drinks".to_string(),
            description: Some("Cold ones".to_string()),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories().save(&drinks()).await.unwrap();

        assert_eq!(db.categories().list().await, vec![drinks()]);
    }

    #[tokio::test]
    async fn test_save_replaces_same_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();
        repo.save(&drinks()).await.unwrap();

        let mut edited = drinks();
        edited.description = None;
        repo.save(&edited).await.unwrap();

        let all = repo.list().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, None);
    }

    #[tokio::test]
    async fn test_rename_relabels_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories().save(&drinks()).await.unwrap();
        db.products()
            .add(&Product::new("Cola", "COLA", "Drinks", 1.5, 10))
            .await
            .unwrap();
        db.products()
            .add(&Product::new("Chips", "CHIPS", "Snacks", 2.0, 4))
            .await
            .unwrap();

        let outcome = db.categories().rename("Drinks", "Beverages").await.unwrap();
        assert_eq!(
            outcome,
            RenameOutcome {
                categories: 1,
                products: 1
            }
        );

        let products = db.products().list().await;
        assert_eq!(products[0].category, "Beverages");
        assert_eq!(products[1].category, "Snacks");
        assert_eq!(db.categories().list().await[0].name, "Beverages");
    }

    #[tokio::test]
    async fn test_rename_unknown_name_changes_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories().save(&drinks()).await.unwrap();

        let outcome = db.categories().rename("Nope", "Other").await.unwrap();
        assert_eq!(outcome, RenameOutcome::default());
        assert_eq!(db.categories().list().await, vec![drinks()]);
    }

    #[tokio::test]
    async fn test_delete_leaves_product_labels() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories().save(&drinks()).await.unwrap();
        db.products()
            .add(&Product::new("Cola", "COLA", "Drinks", 1.5, 10))
            .await
            .unwrap();

        db.categories().delete("c1").await.unwrap();
        db.categories().delete("c1").await.unwrap();

        assert!(db.categories().get_by_id("c1").await.unwrap().is_none());
        assert_eq!(db.products().list().await[0].category, "Drinks");
    }
}
