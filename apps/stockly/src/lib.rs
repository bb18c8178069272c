//! # Stockly Application Library
//!
//! Host layer for the Stockly point-of-sale store: configuration, logging,
//! startup, the command layer and the CLI that drives it.
//!
//! ## Module Organization
//! ```text
//! stockly_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap front end, JSON output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (env, data directory)
//! │   └── db.rs       ◄─── DbState (ready or degraded)
//! ├── commands/
//! │   ├── product.rs  ◄─── Product CRUD, search, low stock
//! │   ├── category.rs ◄─── Category CRUD, rename cascade
//! │   ├── sale.rs     ◄─── Checkout, history
//! │   ├── report.rs   ◄─── Summary, best sellers, CSV
//! │   ├── settings.rs ◄─── Tax rate
//! │   ├── store.rs    ◄─── Backup, restore, reset
//! │   └── status.rs   ◄─── Store health
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use state::{AppConfig, ConfigError, DbState, DB_PATH_VAR, LOG_VAR};

/// Log filter used when neither `RUST_LOG` nor `STOCKLY_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,stockly=debug,sqlx=warn";

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging (stderr; stdout carries JSON results)           │
/// │                                                                         │
/// │  2. Resolve Configuration                                              │
/// │     • --db flag, then STOCKLY_DB_PATH, then ~/.stockly/stockly.db      │
/// │     • Create the data directory                                        │
/// │                                                                         │
/// │  3. Connect to Database                                                │
/// │     • SQLite with WAL mode, schema ensured                             │
/// │     • Failure → degraded state, not an exit                            │
/// │                                                                         │
/// │  4. Execute the subcommand, print JSON, close the pool                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing();

    info!("Starting Stockly");

    let (config, state) = match resolve_config(cli.db) {
        Ok(config) => {
            if let Err(e) = config.provision() {
                error!(error = %e, "Data directory unavailable");
            }
            let state = DbState::connect(&config).await;
            (config, state)
        }
        Err(e) => {
            error!(error = %e, "Configuration failed; running degraded");
            (
                AppConfig::with_database_path(PathBuf::new()),
                DbState::unavailable(e.to_string()),
            )
        }
    };

    let result = cli::execute(cli.command, &state, &config).await;
    state.close().await;

    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to render result: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            match serde_json::to_string(&err) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `STOCKLY_LOG=stockly=trace` - Used when `RUST_LOG` is unset
/// - Default: `info,stockly=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_VAR))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A subscriber may already be installed by an embedding host.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Environment configuration with the `--db` flag taking precedence.
fn resolve_config(db_override: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match db_override {
        Some(path) => {
            let mut config = AppConfig::from_lookup(|key| match key {
                DB_PATH_VAR => Some(path.to_string_lossy().into_owned()),
                _ => std::env::var(key).ok(),
            })?;
            config.database_path = path;
            Ok(config)
        }
        None => AppConfig::from_env(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_environment_path() {
        let config = resolve_config(Some(PathBuf::from("/srv/till/shop.db"))).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/till/shop.db"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
