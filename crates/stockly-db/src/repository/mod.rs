//! # Repository Module
//!
//! Database repository implementations for Stockly.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories                                         │
//! │                                                                         │
//! │  Command (app)                                                         │
//! │       │  db.sales().complete_sale(&sale)                               │
//! │       ▼                                                                 │
//! │  ┌────────────────────┐ ┌────────────────────┐ ┌────────────────────┐  │
//! │  │ ProductRepository  │ │ CategoryRepository │ │  SaleRepository    │  │
//! │  │ list / add /       │ │ list / save /      │ │ complete_sale (tx) │  │
//! │  │ update / delete    │ │ rename (tx) /      │ │ list_sales         │  │
//! │  │                    │ │ delete             │ │ get / items        │  │
//! │  └─────────┬──────────┘ └─────────┬──────────┘ └─────────┬──────────┘  │
//! │            └──────────────────────┼──────────────────────┘             │
//! │                                   ▼                                     │
//! │                          SqlitePool (shared)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conventions
//! - Single-row writes are independent statements on the pool.
//! - `rename_category` and `complete_sale` run as one transaction each.
//! - `list*` methods return an empty sequence when the query fails (logged);
//!   `try_list*` variants surface the error instead.
//! - Update/delete of an unknown id is a successful no-op.
//! - `SettingsRepository` holds store preferences (the checkout tax rate).
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository)
//! - [`CategoryRepository`](category::CategoryRepository)
//! - [`SaleRepository`](sale::SaleRepository)
//! - [`SettingsRepository`](settings::SettingsRepository)

pub mod category;
pub mod product;
pub mod sale;
pub mod settings;
