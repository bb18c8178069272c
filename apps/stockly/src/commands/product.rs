//! # Product Commands
//!
//! Catalog maintenance for products.

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use stockly_core::report::low_stock;
use stockly_core::validation::validate_product;
use stockly_core::{Product, ProductFilter};

/// Lists every product.
pub async fn list_products(state: &DbState) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    Ok(state.db()?.products().list().await)
}

/// Products matching the inventory search and category filter.
pub async fn search_products(
    state: &DbState,
    filter: &ProductFilter,
) -> Result<Vec<Product>, ApiError> {
    debug!(?filter, "search_products command");
    let products = state.db()?.products().list().await;
    Ok(filter.apply(&products))
}

/// Adds a product to the catalog.
///
/// ## Returns
/// * `Ok(Product)` - The stored product
/// * `Err(VALIDATION_ERROR)` - Bad field, nothing written
/// * `Err(CONSTRAINT_VIOLATION)` - `sku` or `id` already taken
pub async fn add_product(state: &DbState, product: Product) -> Result<Product, ApiError> {
    let db = state.db()?;
    validate_product(&product)?;

    db.products().add(&product).await?;
    info!(id = %product.id, sku = %product.sku, "Product added");
    Ok(product)
}

/// Overwrites a product's fields. An unknown id changes nothing.
pub async fn update_product(state: &DbState, product: Product) -> Result<(), ApiError> {
    let db = state.db()?;
    validate_product(&product)?;

    db.products().update(&product).await?;
    Ok(())
}

/// Deletes a product. An unknown id changes nothing.
pub async fn delete_product(state: &DbState, id: &str) -> Result<(), ApiError> {
    state.db()?.products().delete(id).await?;
    Ok(())
}

/// Products at or below `threshold`, lowest stock first.
pub async fn low_stock_products(state: &DbState, threshold: i64) -> Result<Vec<Product>, ApiError> {
    let products = state.db()?.products().list().await;
    Ok(low_stock(&products, threshold))
}
