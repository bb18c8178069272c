//! # stockly-core: Pure Domain Logic for Stockly
//!
//! Entity types and side-effect free helpers shared by the database layer
//! and the application.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stockly Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation layer (checkout, inventory)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ fully-formed entities (JSON)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/stockly (commands)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockly-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌──────────┐   │   │
//! │  │   │   types   │  │ validation │  │  report   │  │  export  │   │   │
//! │  │   │  Product  │  │   rules    │  │  summary  │  │   CSV    │   │   │
//! │  │   │   Sale    │  │   checks   │  │ low stock │  │          │   │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └──────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockly-db (SQLite layer)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Product, Category, Sale, SaleItem)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation used before writes
//! - [`report`] - Dashboard and history aggregates, inventory filters
//! - [`export`] - Sales history CSV rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use stockly_core::{Sale, SaleItem, SalesSummary};
//!
//! let mut sale = Sale::new("cash");
//! sale.items.push(SaleItem::new("p1", "Cola", 2, 5.0));
//! sale.total = 11.0;
//!
//! let summary = SalesSummary::from_sales(&[sale]);
//! assert_eq!(summary.items_sold, 2);
//! ```

pub mod error;
pub mod export;
pub mod report;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use report::{BestSeller, ProductFilter, SaleFilter, SalesSummary};
pub use types::*;

/// Stock level at or below which a product is reported as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Catches typos at the till (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Tax rate (percent) offered at checkout until the store saves its own.
pub const DEFAULT_TAX_RATE: f64 = 12.0;

/// Highest tax rate (percent) the settings accept.
pub const MAX_TAX_RATE: f64 = 100.0;
