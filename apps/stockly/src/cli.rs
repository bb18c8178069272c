//! # Command-Line Front End
//!
//! Maps `stockly` subcommands onto the command layer and returns every
//! result as JSON.
//!
//! ## Command Tree
//! ```text
//! stockly [--db PATH]
//! ├── status
//! ├── products   list [--search TEXT] [--category NAME] | low-stock [--threshold N]
//! │              | add FILE | update FILE | delete ID
//! ├── categories list | save FILE | rename OLD NEW | delete ID
//! ├── sales      list [FILTER] | get ID | complete FILE | summary [FILTER]
//! │              | best-sellers [--limit N] [FILTER] | export PATH [FILTER]
//! ├── settings   tax-rate | set-tax-rate RATE
//! └── store      backup PATH | restore PATH | reset --yes
//!
//! FILTER = [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--method cash|card]
//! ```
//!
//! Entity files hold one JSON object in the camelCase wire format.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::commands::{category, product, report, sale, settings, status, store};
use crate::error::ApiError;
use crate::state::{AppConfig, DbState};
use stockly_core::{ProductFilter, SaleFilter};

/// Stockly: local point-of-sale catalog and sales store
#[derive(Parser, Debug)]
#[command(name = "stockly")]
#[command(about = "Local point-of-sale catalog and sales store")]
#[command(version)]
pub struct Cli {
    /// Store file (overrides STOCKLY_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show store availability and row counts
    Status,

    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Record and inspect sales
    Sales {
        #[command(subcommand)]
        action: SaleAction,
    },

    /// Store preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Back up, restore or clear the whole store
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductAction {
    /// List products, optionally filtered
    List(ProductFilterArgs),

    /// List products running low
    LowStock {
        /// Stock level to report at or below (default: configured threshold)
        #[arg(long)]
        threshold: Option<i64>,
    },

    /// Add the product described in a JSON file
    Add { file: PathBuf },

    /// Overwrite a product from a JSON file
    Update { file: PathBuf },

    /// Delete a product by id
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// List every category
    List,

    /// Insert or replace the category in a JSON file
    Save { file: PathBuf },

    /// Rename a category and relabel its products
    Rename { old: String, new: String },

    /// Delete a category by id
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SaleAction {
    /// List sales, newest first
    List(FilterArgs),

    /// Show one sale
    Get { id: String },

    /// Record the sale in a JSON file
    Complete { file: PathBuf },

    /// Revenue, tax and units sold
    Summary(FilterArgs),

    /// Products that sold the most units
    BestSellers {
        #[arg(long, default_value = "5")]
        limit: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Write the sales history to a CSV file
    Export {
        path: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Show the checkout tax rate (percent)
    TaxRate,

    /// Save the checkout tax rate (percent, 0 to 100)
    SetTaxRate { rate: f64 },
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// Write a snapshot of the store to a new file
    Backup { path: PathBuf },

    /// Replace the store contents with a backup
    Restore { path: PathBuf },

    /// Delete every category, product and sale
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

/// Inventory filter flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ProductFilterArgs {
    /// Text to find in the name or SKU (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Exact category label
    #[arg(long)]
    pub category: Option<String>,
}

impl From<ProductFilterArgs> for ProductFilter {
    fn from(args: ProductFilterArgs) -> Self {
        ProductFilter {
            search: args.search,
            category: args.category,
        }
    }
}

/// Sale history filter flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Payment method (case-insensitive)
    #[arg(long)]
    pub method: Option<String>,
}

impl From<FilterArgs> for SaleFilter {
    fn from(args: FilterArgs) -> Self {
        SaleFilter {
            from: args.from,
            to: args.to,
            payment_method: args.method,
        }
    }
}

/// Runs one subcommand and returns its JSON result.
pub async fn execute(
    command: Command,
    state: &DbState,
    config: &AppConfig,
) -> Result<Value, ApiError> {
    debug!(?command, "Executing command");

    match command {
        Command::Status => to_json(status::status(state).await?),

        Command::Products { action } => match action {
            ProductAction::List(filter) => {
                to_json(product::search_products(state, &filter.into()).await?)
            }
            ProductAction::LowStock { threshold } => {
                let threshold = threshold.unwrap_or(config.low_stock_threshold);
                to_json(product::low_stock_products(state, threshold).await?)
            }
            ProductAction::Add { file } => {
                to_json(product::add_product(state, read_entity(&file)?).await?)
            }
            ProductAction::Update { file } => {
                product::update_product(state, read_entity(&file)?).await?;
                Ok(json!({ "updated": true }))
            }
            ProductAction::Delete { id } => {
                product::delete_product(state, &id).await?;
                Ok(json!({ "deleted": id }))
            }
        },

        Command::Categories { action } => match action {
            CategoryAction::List => to_json(category::list_categories(state).await?),
            CategoryAction::Save { file } => {
                to_json(category::save_category(state, read_entity(&file)?).await?)
            }
            CategoryAction::Rename { old, new } => {
                to_json(category::rename_category(state, &old, &new).await?)
            }
            CategoryAction::Delete { id } => {
                category::delete_category(state, &id).await?;
                Ok(json!({ "deleted": id }))
            }
        },

        Command::Sales { action } => match action {
            SaleAction::List(filter) => {
                to_json(sale::sales_history(state, &filter.into()).await?)
            }
            SaleAction::Get { id } => to_json(sale::get_sale(state, &id).await?),
            SaleAction::Complete { file } => {
                to_json(sale::complete_sale(state, read_entity(&file)?).await?)
            }
            SaleAction::Summary(filter) => {
                to_json(report::sales_summary(state, &filter.into()).await?)
            }
            SaleAction::BestSellers { limit, filter } => {
                to_json(report::best_sellers(state, &filter.into(), limit).await?)
            }
            SaleAction::Export { path, filter } => {
                let csv = report::export_sales_csv(state, &filter.into()).await?;
                std::fs::write(&path, &csv).map_err(|e| {
                    ApiError::internal(format!("cannot write {}: {}", path.display(), e))
                })?;
                Ok(json!({ "path": path, "bytes": csv.len() }))
            }
        },

        Command::Settings { action } => match action {
            SettingsAction::TaxRate => {
                Ok(json!({ "taxRate": settings::get_tax_rate(state).await? }))
            }
            SettingsAction::SetTaxRate { rate } => {
                Ok(json!({ "taxRate": settings::save_tax_rate(state, rate).await? }))
            }
        },

        Command::Store { action } => match action {
            StoreAction::Backup { path } => {
                store::backup_store(state, &path).await?;
                Ok(json!({ "backup": path }))
            }
            StoreAction::Restore { path } => to_json(store::restore_store(state, &path).await?),
            StoreAction::Reset { yes } => {
                if !yes {
                    return Err(ApiError::validation(
                        "reset deletes all catalog and sales data; pass --yes to confirm",
                    ));
                }
                to_json(store::reset_store(state).await?)
            }
        },
    }
}

/// Reads one JSON entity from `path`.
fn read_entity<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::validation(format!("cannot read {}: {}", path.display(), e)))?;

    serde_json::from_str(&raw)
        .map_err(|e| ApiError::validation(format!("invalid JSON in {}: {}", path.display(), e)))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    fn write_json(dir: &Path, name: &str, value: Value) -> String {
        let path = dir.join(name);
        std::fs::write(&path, value.to_string()).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_parses_filters_and_global_db() {
        let cli = Cli::try_parse_from([
            "stockly",
            "sales",
            "list",
            "--from",
            "2026-04-01",
            "--method",
            "cash",
            "--db",
            "/tmp/x.db",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        match cli.command {
            Command::Sales {
                action: SaleAction::List(filter),
            } => {
                assert_eq!(filter.from, NaiveDate::from_ymd_opt(2026, 4, 1));
                assert_eq!(filter.method.as_deref(), Some("cash"));
                assert!(filter.to.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["stockly", "sales", "summary", "--from", "April"]).is_err());
    }

    #[tokio::test]
    async fn test_checkout_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state().await;
        let config = AppConfig::with_database_path(":memory:");

        let product = write_json(
            dir.path(),
            "cola.json",
            json!({
                "id": "p1", "name": "Cola", "sku": "COLA", "category": "Drinks",
                "price": 5.0, "stock": 10, "createdAt": "2026-04-01T08:00:00Z"
            }),
        );
        execute(parse(&["stockly", "products", "add", &product]), &state, &config)
            .await
            .unwrap();

        let sale = write_json(
            dir.path(),
            "s1.json",
            json!({
                "id": "s1",
                "items": [{"productId": "p1", "productName": "Cola", "quantity": 2, "price": 5.0}],
                "subtotal": 10.0, "tax": 1.0, "taxRate": 0.1, "total": 11.0,
                "paymentMethod": "cash", "amountTendered": 20.0, "change": 9.0,
                "createdAt": "2026-04-01T09:00:00Z"
            }),
        );
        execute(parse(&["stockly", "sales", "complete", &sale]), &state, &config)
            .await
            .unwrap();

        let low = execute(
            parse(&["stockly", "products", "low-stock", "--threshold", "8"]),
            &state,
            &config,
        )
        .await
        .unwrap();
        assert_eq!(low[0]["stock"], 8);

        let sales = execute(parse(&["stockly", "sales", "list"]), &state, &config)
            .await
            .unwrap();
        assert_eq!(sales[0]["change"], 9.0);
        assert_eq!(sales[0]["items"][0]["quantity"], 2);
    }

    #[tokio::test]
    async fn test_malformed_file_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state().await;
        let config = AppConfig::with_database_path(":memory:");

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let path = path.display().to_string();

        let err = execute(parse(&["stockly", "categories", "save", &path]), &state, &config)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_product_list_filters() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state().await;
        let config = AppConfig::with_database_path(":memory:");

        for (id, name, sku, category) in [
            ("p1", "Cola", "BEV-COL", "Drinks"),
            ("p2", "Chips", "SNK-CHI", "Snacks"),
        ] {
            let file = write_json(
                dir.path(),
                &format!("{id}.json"),
                json!({
                    "id": id, "name": name, "sku": sku, "category": category,
                    "price": 1.0, "stock": 3, "createdAt": "2026-04-01T08:00:00Z"
                }),
            );
            execute(parse(&["stockly", "products", "add", &file]), &state, &config)
                .await
                .unwrap();
        }

        let all = execute(parse(&["stockly", "products", "list"]), &state, &config)
            .await
            .unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);

        let snacks = execute(
            parse(&["stockly", "products", "list", "--search", "snk", "--category", "Snacks"]),
            &state,
            &config,
        )
        .await
        .unwrap();
        assert_eq!(snacks.as_array().unwrap().len(), 1);
        assert_eq!(snacks[0]["name"], "Chips");
    }

    #[tokio::test]
    async fn test_tax_rate_commands() {
        let state = test_support::state().await;
        let config = AppConfig::with_database_path(":memory:");

        let saved = execute(
            parse(&["stockly", "settings", "set-tax-rate", "7.5"]),
            &state,
            &config,
        )
        .await
        .unwrap();
        assert_eq!(saved["taxRate"], 7.5);

        let read = execute(parse(&["stockly", "settings", "tax-rate"]), &state, &config)
            .await
            .unwrap();
        assert_eq!(read["taxRate"], 7.5);
    }

    #[tokio::test]
    async fn test_store_backup_and_guarded_reset() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state().await;
        let config = AppConfig::with_database_path(":memory:");
        let backup = dir.path().join("till.bak").display().to_string();

        execute(parse(&["stockly", "store", "backup", &backup]), &state, &config)
            .await
            .unwrap();
        assert!(Path::new(&backup).is_file());

        let err = execute(parse(&["stockly", "store", "reset"]), &state, &config)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let removed = execute(parse(&["stockly", "store", "reset", "--yes"]), &state, &config)
            .await
            .unwrap();
        assert_eq!(removed["saleItems"], 0);

        let restored = execute(parse(&["stockly", "store", "restore", &backup]), &state, &config)
            .await
            .unwrap();
        assert_eq!(restored["products"], 0);
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state().await;
        let config = AppConfig::with_database_path(":memory:");
        let out = dir.path().join("sales.csv").display().to_string();

        execute(parse(&["stockly", "sales", "export", &out]), &state, &config)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("\"Date\",\"Sale ID\""));
    }
}
