//! # Commands Module
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Catalog: products, search, low stock
//! ├── category.rs  ◄─── Catalog: categories, rename cascade
//! ├── sale.rs      ◄─── Complete sale, sale history
//! ├── report.rs    ◄─── Summary, best sellers, CSV export
//! ├── settings.rs  ◄─── Checkout tax rate
//! ├── store.rs     ◄─── Backup, restore, reset
//! └── status.rs    ◄─── Store health and row counts
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Caller (CLI or embedding UI)                                          │
//! │       │   add_product(&state, product)                                 │
//! │       ▼                                                                 │
//! │  state.db()?          ◄── CONNECTION_ERROR while degraded              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_*()?        ◄── VALIDATION_ERROR, nothing written            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repository call?     ◄── DbError mapped to ApiError                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Result<T, ApiError>  (serializable both ways)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! List commands return an empty list when the read itself fails.

pub mod category;
pub mod product;
pub mod report;
pub mod sale;
pub mod settings;
pub mod status;
pub mod store;
