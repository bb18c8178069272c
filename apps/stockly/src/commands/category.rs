//! # Category Commands
//!
//! Categories are matched to products by name, so a rename goes through
//! [`rename_category`], which relabels products in the same transaction.

use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use stockly_core::validation::{validate_category, validate_category_name};
use stockly_core::Category;
use stockly_db::RenameOutcome;

/// Lists every category.
pub async fn list_categories(state: &DbState) -> Result<Vec<Category>, ApiError> {
    debug!("list_categories command");
    Ok(state.db()?.categories().list().await)
}

/// Inserts a category, or replaces the one with the same id.
pub async fn save_category(state: &DbState, category: Category) -> Result<Category, ApiError> {
    let db = state.db()?;
    validate_category(&category)?;

    db.categories().save(&category).await?;
    Ok(category)
}

/// Renames a category and every product that carries it, atomically.
pub async fn rename_category(
    state: &DbState,
    old_name: &str,
    new_name: &str,
) -> Result<RenameOutcome, ApiError> {
    let db = state.db()?;
    validate_category_name(new_name)?;

    Ok(db.categories().rename(old_name, new_name).await?)
}

/// Deletes a category. Products keep their label.
pub async fn delete_category(state: &DbState, id: &str) -> Result<(), ApiError> {
    state.db()?.categories().delete(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{add_product, list_products};
    use crate::commands::test_support;
    use crate::error::ErrorCode;
    use stockly_core::Product;

    #[tokio::test]
    async fn test_rename_cascades_to_products() {
        let state = test_support::state().await;
        save_category(&state, Category::new("Drinks")).await.unwrap();
        add_product(&state, Product::new("Cola", "C", "Drinks", 1.0, 3))
            .await
            .unwrap();

        let outcome = rename_category(&state, "Drinks", "Beverages").await.unwrap();
        assert_eq!(outcome.products, 1);

        assert_eq!(list_categories(&state).await.unwrap()[0].name, "Beverages");
        assert_eq!(list_products(&state).await.unwrap()[0].category, "Beverages");
    }

    #[tokio::test]
    async fn test_rename_to_blank_is_rejected() {
        let state = test_support::state().await;
        save_category(&state, Category::new("Drinks")).await.unwrap();

        let err = rename_category(&state, "Drinks", "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_categories(&state).await.unwrap()[0].name, "Drinks");
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let state = test_support::state().await;
        let snacks = save_category(&state, Category::new("Snacks").with_description("Crunchy"))
            .await
            .unwrap();

        delete_category(&state, &snacks.id).await.unwrap();
        assert!(list_categories(&state).await.unwrap().is_empty());
    }
}
