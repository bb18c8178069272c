//! # State Module
//!
//! Startup state shared by the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │          AppConfig           │   │           DbState            │   │
//! │  │                              │   │                              │   │
//! │  │  database_path               │──►│  Ready(Database)             │   │
//! │  │  low_stock_threshold         │   │  or Unavailable(reason)      │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has an internal connection pool (thread-safe)     │
//! │  • AppConfig: Read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{AppConfig, ConfigError, DB_PATH_VAR, LOG_VAR, LOW_STOCK_VAR};
pub use db::DbState;
