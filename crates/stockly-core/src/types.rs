//! # Domain Types
//!
//! Entities persisted by Stockly.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   category (by name)   ┌─────────────────┐        │
//! │  │    Product      │ ─────────────────────► │    Category     │        │
//! │  │  id, sku        │                        │  id, name       │        │
//! │  │  price, stock   │                        │  description    │        │
//! │  └─────────────────┘                        └─────────────────┘        │
//! │          ▲                                                              │
//! │          │ product_id (weak, not enforced)                              │
//! │  ┌───────┴─────────┐   owns 0..n   ┌─────────────────┐                 │
//! │  │    SaleItem     │ ◄──────────── │      Sale       │                 │
//! │  │  name snapshot  │               │  totals, tender │                 │
//! │  │  price snapshot │               │  payment method │                 │
//! │  └─────────────────┘               └─────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase keys, which is what the presentation
//! layer sends and expects back. `Sale::change_due` travels as `change`.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a new entity id (UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as an RFC 3339 timestamp, the format used for `createdAt`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Opaque unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit, unique across the catalog.
    pub sku: String,

    /// Category label. Matches `Category::name`, not `Category::id`.
    pub category: String,

    /// Unit price.
    pub price: f64,

    /// Units on hand. Goes negative when oversold.
    pub stock: i64,

    pub created_at: String,
}

impl Product {
    /// Creates a product with a fresh id and creation timestamp.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Self {
        Product {
            id: new_id(),
            name: name.into(),
            sku: sku.into(),
            category: category.into(),
            price,
            stock,
            created_at: now_timestamp(),
        }
    }

    /// Whether the product has anything left to sell.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Products reference categories by `name`, so renaming a category has to
/// rewrite the label on every product carrying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

impl Category {
    /// Creates a category with a fresh id and creation timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: new_id(),
            name: name.into(),
            description: None,
            created_at: now_timestamp(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
///
/// ## Snapshot Pattern
/// `product_name` and `price` are copied from the product at sale time so the
/// receipt stays stable when the catalog entry is edited or deleted later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleItem {
    /// Product sold. Not checked against the catalog.
    pub product_id: String,

    /// Product name at time of sale.
    pub product_name: String,

    pub quantity: i64,

    /// Unit price at time of sale.
    pub price: f64,
}

impl SaleItem {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Self {
        SaleItem {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            price,
        }
    }

    /// Builds a line item from a catalog product, snapshotting name and price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        SaleItem::new(&product.id, &product.name, quantity, product.price)
    }

    /// `price × quantity`.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale: header fields plus its line items.
///
/// Totals are caller-supplied. The expected relations are
/// `total = subtotal + tax` and `change_due = amount_tendered - total`, but
/// nothing below the presentation layer recomputes or enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,

    /// Line items, in the order they were rung up.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<SaleItem>,

    pub subtotal: f64,
    pub tax: f64,

    /// Tax rate as entered at the till (e.g. `12` for 12%).
    pub tax_rate: f64,

    pub total: f64,

    /// "cash" or "card".
    pub payment_method: String,

    #[serde(default)]
    pub amount_tendered: f64,

    #[serde(rename = "change", default)]
    pub change_due: f64,

    pub created_at: String,
}

impl Sale {
    /// Creates an empty sale with a fresh id and creation timestamp.
    pub fn new(payment_method: impl Into<String>) -> Self {
        Sale {
            id: new_id(),
            items: Vec::new(),
            subtotal: 0.0,
            tax: 0.0,
            tax_rate: 0.0,
            total: 0.0,
            payment_method: payment_method.into(),
            amount_tendered: 0.0,
            change_due: 0.0,
            created_at: now_timestamp(),
        }
    }

    /// Total number of units across all line items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: "p1".to_string(),
            name: "Cola".to_string(),
            sku: "COLA-330".to_string(),
            category: "Beverages".to_string(),
            price: 1.5,
            stock: 10,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(json["sku"], "COLA-330");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_sale_change_key_and_defaults() {
        let json = r#"{
            "id": "s1",
            "items": [{"productId": "p1", "productName": "Cola", "quantity": 2, "price": 5.0}],
            "subtotal": 10.0,
            "tax": 1.0,
            "taxRate": 0.1,
            "total": 11.0,
            "paymentMethod": "card",
            "createdAt": "2026-01-01T00:00:00Z"
        }"#;

        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.amount_tendered, 0.0);
        assert_eq!(sale.change_due, 0.0);
        assert_eq!(sale.items[0].product_id, "p1");

        let out = serde_json::to_value(&sale).unwrap();
        assert_eq!(out["change"], 0.0);
        assert!(out.get("changeDue").is_none());
    }

    #[test]
    fn test_sale_item_count_and_line_total() {
        let mut sale = Sale::new("cash");
        sale.items.push(SaleItem::new("p1", "Cola", 2, 5.0));
        sale.items.push(SaleItem::new("p2", "Chips", 3, 1.25));

        assert_eq!(sale.item_count(), 5);
        assert!((sale.items[1].line_total() - 3.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_in_stock() {
        assert!(Product::new("Cola", "COLA", "Beverages", 1.5, 1).in_stock());
        assert!(!Product::new("Cola", "COLA", "Beverages", 1.5, 0).in_stock());
        assert!(!Product::new("Cola", "COLA", "Beverages", 1.5, -3).in_stock());
    }

    #[test]
    fn test_sale_item_snapshots_product() {
        let product = Product::new("Cola", "COLA-330", "Beverages", 1.5, 10);
        let item = SaleItem::from_product(&product, 4);

        assert_eq!(item.product_id, product.id);
        assert_eq!(item.product_name, "Cola");
        assert_eq!(item.price, 1.5);
    }

    #[test]
    fn test_constructors_generate_ids() {
        let a = Category::new("Snacks");
        let b = Category::new("Snacks");
        assert_ne!(a.id, b.id);
        assert!(chrono::DateTime::parse_from_rfc3339(&a.created_at).is_ok());
    }
}
