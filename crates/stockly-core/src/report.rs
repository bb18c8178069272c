//! # Sales Reports
//!
//! Aggregates computed over sales and products that have already been read
//! from the store. Nothing here is cached: callers rebuild reports from a
//! fresh listing each time.
//!
//! ## Reports
//! - [`SalesSummary`] - dashboard totals (count, revenue, tax, units)
//! - [`best_sellers`] - top products by units sold
//! - [`SaleFilter`] - sales history filtering by date and payment method
//! - [`low_stock`] - inventory warning list
//! - [`ProductFilter`] - inventory search by name/SKU and category

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, Sale};

// =============================================================================
// Summary
// =============================================================================

/// Totals across a set of sales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    pub sale_count: usize,
    /// Sum of sale totals.
    pub revenue: f64,
    pub tax_collected: f64,
    /// Units sold across every line item.
    pub items_sold: i64,
}

impl SalesSummary {
    pub fn from_sales(sales: &[Sale]) -> Self {
        sales.iter().fold(SalesSummary::default(), |mut acc, sale| {
            acc.sale_count += 1;
            acc.revenue += sale.total;
            acc.tax_collected += sale.tax;
            acc.items_sold += sale.item_count();
            acc
        })
    }
}

// =============================================================================
// Best Sellers
// =============================================================================

/// Units and revenue for one product across many sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BestSeller {
    pub product_id: String,
    /// Name snapshot from the first sale that carried the product.
    pub product_name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Ranks products by units sold, highest first. Ties are broken by name.
pub fn best_sellers(sales: &[Sale], limit: usize) -> Vec<BestSeller> {
    let mut by_product: HashMap<&str, BestSeller> = HashMap::new();

    for item in sales.iter().flat_map(|sale| sale.items.iter()) {
        let entry = by_product
            .entry(item.product_id.as_str())
            .or_insert_with(|| BestSeller {
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                quantity: 0,
                revenue: 0.0,
            });
        entry.quantity += item.quantity;
        entry.revenue += item.line_total();
    }

    let mut ranked: Vec<BestSeller> = by_product.into_values().collect();
    ranked.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// History Filter
// =============================================================================

/// Sales history filter.
///
/// Date bounds are compared against the UTC calendar date of `createdAt`
/// and are both inclusive. A sale whose timestamp cannot be parsed never
/// satisfies a date bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub payment_method: Option<String>,
}

impl SaleFilter {
    pub fn matches(&self, sale: &Sale) -> bool {
        if let Some(method) = &self.payment_method {
            if !sale.payment_method.eq_ignore_ascii_case(method) {
                return false;
            }
        }

        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        let Some(date) = sale_date(sale) else {
            return false;
        };

        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Returns the matching sales, newest first.
    pub fn apply(&self, sales: &[Sale]) -> Vec<Sale> {
        let mut matching: Vec<Sale> = sales.iter().filter(|s| self.matches(s)).cloned().collect();
        matching.sort_by(|a, b| parse_created_at(b).cmp(&parse_created_at(a)));
        matching
    }
}

fn parse_created_at(sale: &Sale) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&sale.created_at)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn sale_date(sale: &Sale) -> Option<NaiveDate> {
    parse_created_at(sale).map(|dt| dt.date_naive())
}

// =============================================================================
// Inventory
// =============================================================================

/// Products whose stock is at or below `threshold`, lowest stock first.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<Product> {
    let mut low: Vec<Product> = products
        .iter()
        .filter(|p| p.stock <= threshold)
        .cloned()
        .collect();
    low.sort_by_key(|p| p.stock);
    low
}

/// Inventory screen filter.
///
/// `search` matches a case-insensitive substring of the name or the SKU.
/// `category` matches the label exactly. An empty or absent field matches
/// every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.as_deref().map(str::trim).unwrap_or_default();
        if !search.is_empty() {
            let needle = search.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.sku.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        match self.category.as_deref() {
            Some(category) if !category.is_empty() => product.category == category,
            _ => true,
        }
    }

    /// Returns the matching products in their listing order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
