//! # Seed Data Generator
//!
//! Populates a Stockly database with categories and sample products for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p stockly-db --bin seed
//!
//! # Generate custom amount (families repeat with a round suffix past 200)
//! cargo run -p stockly-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p stockly-db --bin seed -- --db ./data/stockly.db
//! ```
//!
//! ## Generated Data
//! One category per product family:
//! - Beverages, Snacks, Dairy, Frozen, Grocery
//!
//! Each product has:
//! - Unique SKU: `{CODE}-{NAME}-{INDEX}`, plus `-R{n}` from the second round on
//! - Name with a size suffix, plus `#{n}` from the second round on
//! - Price between 1.99 and 9.99 plus a size markup
//! - Stock between 0 and 40, so some products land under the low-stock line

use clap::Parser;
use std::path::PathBuf;
use stockly_core::report::low_stock;
use stockly_core::{Category, Product, LOW_STOCK_THRESHOLD};
use stockly_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Product families: (category name, SKU code, product names)
const FAMILIES: &[(&str, &str, &[&str])] = &[
    (
        "Beverages",
        "BEV",
        &[
            "Coca-Cola",
            "Sprite",
            "Orange Juice",
            "Iced Tea",
            "Mineral Water",
            "Lemonade",
            "Cold Brew",
            "Energy Drink",
        ],
    ),
    (
        "Snacks",
        "SNK",
        &[
            "Potato Chips",
            "Pretzels",
            "Chocolate Bar",
            "Gummy Bears",
            "Trail Mix",
            "Popcorn",
            "Oat Cookies",
            "Rice Crackers",
        ],
    ),
    (
        "Dairy",
        "DRY",
        &[
            "Whole Milk",
            "Oat Milk",
            "Cheddar Cheese",
            "Greek Yogurt",
            "Butter",
            "Cream Cheese",
            "Eggs Dozen",
            "Sour Cream",
        ],
    ),
    (
        "Frozen",
        "FRZ",
        &[
            "Vanilla Ice Cream",
            "Frozen Pizza",
            "Fish Sticks",
            "Frozen Peas",
            "Waffles",
            "Sorbet",
            "Dumplings",
            "Frozen Berries",
        ],
    ),
    (
        "Grocery",
        "GRO",
        &[
            "White Bread",
            "Spaghetti",
            "Basmati Rice",
            "Canned Tomatoes",
            "Peanut Butter",
            "Honey",
            "Rolled Oats",
            "Olive Oil",
        ],
    ),
];

/// Size variants and their price markup.
const SIZES: &[(&str, f64)] = &[
    ("Small", 0.0),
    ("Medium", 1.0),
    ("Large", 2.0),
    ("Family", 3.5),
    ("Multipack", 5.0),
];

/// Stockly seed data generator
#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Populate a Stockly database with sample categories and products")]
struct Args {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./stockly_dev.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    println!("Stockly Seed Data Generator");
    println!("===========================");
    println!("Database: {}", args.db.display());
    println!("Products: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let categories = db.categories();
    for (name, code, _) in FAMILIES {
        categories
            .save(&Category::new(*name).with_description(format!("{code} products")))
            .await?;
    }
    println!("✓ Created {} categories", FAMILIES.len());

    let mut generated = 0;
    let start = std::time::Instant::now();

    for product in catalog(args.count) {
        if let Err(e) = db.products().add(&product).await {
            eprintln!("Failed to insert {}: {}", product.sku, e);
            continue;
        }
        generated += 1;
    }

    let elapsed = start.elapsed();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let products = db.products().list().await;
    let out = products.iter().filter(|p| !p.in_stock()).count();
    let low = low_stock(&products, LOW_STOCK_THRESHOLD);
    println!(
        "  {} products at or below the low-stock threshold ({} out of stock)",
        low.len(),
        out
    );

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Builds `count` products, cycling through every family, name and size.
///
/// Later rounds repeat the combinations with a round marker in the name and
/// SKU, so any count yields unique SKUs.
fn catalog(count: usize) -> Vec<Product> {
    let mut products = Vec::with_capacity(count);
    let mut round = 0;

    while products.len() < count {
        for (family_idx, (category, code, names)) in FAMILIES.iter().enumerate() {
            for (name_idx, name) in names.iter().enumerate() {
                for (size_idx, (size, markup)) in SIZES.iter().enumerate() {
                    if products.len() >= count {
                        return products;
                    }

                    let seed = family_idx * 1000 + name_idx * 20 + size_idx;
                    products.push(generate_product(
                        category, code, name, size, *markup, seed, round,
                    ));
                }
            }
        }
        round += 1;
    }

    products
}

/// Builds one product with deterministic pseudo-random price and stock.
fn generate_product(
    category: &str,
    code: &str,
    name: &str,
    size: &str,
    markup: f64,
    seed: usize,
    round: usize,
) -> Product {
    let short: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();

    let (sku, full_name) = if round == 0 {
        (
            format!("{}-{}-{:04}", code, short, seed),
            format!("{} {}", name, size),
        )
    } else {
        (
            format!("{}-{}-{:04}-R{}", code, short, seed, round + 1),
            format!("{} {} #{}", name, size, round + 1),
        )
    };

    let mixed = seed + round * 7;
    let base_cents = 199 + (mixed * 17) % 800;
    let price = (base_cents as f64) / 100.0 + markup;

    let stock = (mixed % 41) as i64;

    Product::new(full_name, sku, category, price, stock)
}
