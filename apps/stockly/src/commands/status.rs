//! # Status Command
//!
//! Reports whether the store is usable and what it holds. Unlike every
//! other command this one answers in degraded mode too.

use serde::Serialize;

use crate::error::ApiError;
use crate::state::DbState;
use stockly_db::schema;

/// Store health snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub available: bool,

    /// Why the store could not be opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,

    pub tables: Vec<String>,
    pub products: i64,
    pub categories: usize,
    pub sales: i64,
}

/// Reports store availability, tables and row counts.
pub async fn status(state: &DbState) -> Result<StatusReport, ApiError> {
    let Ok(db) = state.db() else {
        return Ok(StatusReport {
            available: false,
            failure: state.failure().map(str::to_string),
            tables: Vec::new(),
            products: 0,
            categories: 0,
            sales: 0,
        });
    };

    Ok(StatusReport {
        available: db.health_check().await,
        failure: None,
        tables: schema::table_names(db.pool()).await?,
        products: db.products().count().await?,
        categories: db.categories().try_list().await?.len(),
        sales: db.sales().count().await?,
    })
}
