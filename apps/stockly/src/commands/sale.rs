//! # Sale Commands
//!
//! Checkout and sale history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Presentation layer builds the Sale (items, totals, tender, change)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  complete_sale(&state, sale)                                           │
//! │       ├── validate_sale()        → VALIDATION_ERROR, nothing written   │
//! │       └── SaleRepository::complete_sale()                              │
//! │             header + items + stock decrements, one transaction         │
//! │             └── any failure → TRANSACTION_ABORTED, nothing written     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use stockly_core::validation::validate_sale;
use stockly_core::{Sale, SaleFilter};

/// Records a completed sale and takes its items out of stock.
///
/// Totals are stored as given, never recomputed.
pub async fn complete_sale(state: &DbState, sale: Sale) -> Result<Sale, ApiError> {
    let db = state.db()?;
    validate_sale(&sale)?;

    db.sales().complete_sale(&sale).await?;
    Ok(sale)
}

/// Lists every sale with its items, in the order they were recorded.
pub async fn list_sales(state: &DbState) -> Result<Vec<Sale>, ApiError> {
    debug!("list_sales command");
    Ok(state.db()?.sales().list().await)
}

/// Sales matching `filter`, newest first.
pub async fn sales_history(state: &DbState, filter: &SaleFilter) -> Result<Vec<Sale>, ApiError> {
    let sales = list_sales(state).await?;
    Ok(filter.apply(&sales))
}

/// Gets one sale with its items.
pub async fn get_sale(state: &DbState, id: &str) -> Result<Option<Sale>, ApiError> {
    Ok(state.db()?.sales().get_by_id(id).await?)
}
