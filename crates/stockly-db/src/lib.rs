//! # stockly-db: Database Layer for Stockly
//!
//! SQLite storage for the Stockly point of sale, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockly Data Flow                                │
//! │                                                                         │
//! │  Command (complete_sale)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockly-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │               │    │ (schema.rs)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CategoryRepo  │    │ CREATE ...   │  │   │
//! │  │   │ Connection    │    │ SaleRepo      │    │ IF NOT EXISTS│  │   │
//! │  │   │ Management    │    │ (transaction) │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.stockly/stockly.db                                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Idempotent table creation
//! - [`error`] - Database error types
//! - [`repository`] - Product, category, sale and settings repositories
//! - [`maintenance`] - Backup, restore and reset of the whole store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockly_db::{Database, DbConfig};
//!
//! // Opens the pool and ensures the schema
//! let db = Database::new(DbConfig::new("path/to/stockly.db")).await?;
//!
//! db.products().add(&product).await?;
//! db.sales().complete_sale(&sale).await?;
//! let history = db.sales().list().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod maintenance;
pub mod pool;
pub mod repository;
pub mod schema;
mod transaction;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use maintenance::TableCounts;
pub use pool::{Database, DbConfig};
pub use schema::{SchemaFailure, SchemaReport};

// Repository re-exports for convenience
pub use repository::category::{CategoryRepository, RenameOutcome};
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;
