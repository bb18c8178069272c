//! # Report Commands
//!
//! Dashboard figures and the sales export, computed over the sale history
//! read from the store.

use crate::commands::sale::sales_history;
use crate::error::ApiError;
use crate::state::DbState;
use stockly_core::export::sales_to_csv;
use stockly_core::report::{self, BestSeller, SaleFilter, SalesSummary};

/// Totals over the sales matching `filter`.
pub async fn sales_summary(state: &DbState, filter: &SaleFilter) -> Result<SalesSummary, ApiError> {
    let sales = sales_history(state, filter).await?;
    Ok(SalesSummary::from_sales(&sales))
}

/// The `limit` products that sold the most units.
pub async fn best_sellers(
    state: &DbState,
    filter: &SaleFilter,
    limit: usize,
) -> Result<Vec<BestSeller>, ApiError> {
    let sales = sales_history(state, filter).await?;
    Ok(report::best_sellers(&sales, limit))
}

/// CSV rendering of the sales matching `filter`, newest first.
pub async fn export_sales_csv(state: &DbState, filter: &SaleFilter) -> Result<String, ApiError> {
    let sales = sales_history(state, filter).await?;
    Ok(sales_to_csv(&sales)?)
}
