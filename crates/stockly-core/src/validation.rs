//! # Validation Module
//!
//! Input checks applied by the command layer before a write.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  └── Form checks, immediate feedback                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                               │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE(sku) / PRIMARY KEY                              │
//! │  └── sale_items.saleId → sales.id                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories never call into this module. They persist exactly what they
//! are handed.

use crate::error::ValidationError;
use crate::types::{Category, Product, Sale, SaleItem};
use crate::{MAX_ITEM_QUANTITY, MAX_TAX_RATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ID_LEN: usize = 100;
const MAX_SKU_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 100;

fn require_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a SKU.
///
/// ## Example
/// ```rust
/// use stockly_core::validation::validate_sku;
///
/// assert!(validate_sku("COLA-330").is_ok());
/// assert!(validate_sku("  ").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    require_text("sku", sku, MAX_SKU_LEN)
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require_text("name", name, MAX_NAME_LEN)
}

/// Validates a category name.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    require_text("category", name, MAX_CATEGORY_LEN)
}

/// Validates a monetary amount: finite and not negative. Zero is allowed.
pub fn validate_price(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate given in percent (`12.0` means 12%).
///
/// ## Rules
/// - Finite
/// - Between 0 and MAX_TAX_RATE (100), inclusive
pub fn validate_tax_rate(rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "taxRate".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_TAX_RATE).contains(&rate) {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: MAX_TAX_RATE as i64,
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates every field of a product the caller wants to store.
///
/// Stock may be any integer: oversold products carry negative stock.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    require_text("id", &product.id, MAX_ID_LEN)?;
    validate_product_name(&product.name)?;
    validate_sku(&product.sku)?;
    validate_price("price", product.price)?;
    Ok(())
}

/// Validates a category before it is saved.
pub fn validate_category(category: &Category) -> ValidationResult<()> {
    require_text("id", &category.id, MAX_ID_LEN)?;
    validate_category_name(&category.name)
}

/// Validates the line items of a sale.
///
/// An empty list passes: a sale without items is still recorded.
pub fn validate_sale_items(items: &[SaleItem]) -> ValidationResult<()> {
    for item in items {
        require_text("productId", &item.product_id, MAX_ID_LEN)?;
        validate_quantity(item.quantity)?;
        validate_price("price", item.price)?;
    }
    Ok(())
}

/// Validates a sale before it is completed.
///
/// Totals are only checked for being usable numbers; their arithmetic is the
/// caller's business. `change` is left alone since it may be negative.
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    require_text("id", &sale.id, MAX_ID_LEN)?;
    require_text("paymentMethod", &sale.payment_method, MAX_CATEGORY_LEN)?;
    validate_price("subtotal", sale.subtotal)?;
    validate_price("tax", sale.tax)?;
    validate_price("total", sale.total)?;
    validate_price("amountTendered", sale.amount_tendered)?;
    validate_sale_items(&sale.items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("COLA-330").is_ok());
        assert!(validate_sku("with space").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", 0.0).is_ok());
        assert!(validate_price("price", 10.99).is_ok());
        assert!(validate_price("price", -0.01).is_err());
        assert!(validate_price("price", f64::NAN).is_err());
        assert!(validate_price("price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_product_allows_negative_stock() {
        let mut product = Product::new("Cola", "COLA-330", "Beverages", 1.5, -4);
        assert!(validate_product(&product).is_ok());

        product.name = String::new();
        assert_eq!(
            validate_product(&product),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_sale_items() {
        assert!(validate_sale_items(&[]).is_ok());
        assert!(validate_sale_items(&[SaleItem::new("p1", "Cola", 2, 5.0)]).is_ok());
        assert!(validate_sale_items(&[SaleItem::new("p1", "Cola", 0, 5.0)]).is_err());
        assert!(validate_sale_items(&[SaleItem::new("", "Cola", 1, 5.0)]).is_err());
    }

    #[test]
    fn test_validate_sale() {
        let mut sale = Sale::new("cash");
        sale.items.push(SaleItem::new("p1", "Cola", 2, 5.0));
        sale.total = 11.0;
        sale.change_due = -1.0;
        assert!(validate_sale(&sale).is_ok());

        sale.payment_method = " ".to_string();
        assert_eq!(
            validate_sale(&sale),
            Err(ValidationError::Required {
                field: "paymentMethod".to_string()
            })
        );

        sale.payment_method = "card".to_string();
        sale.total = f64::NAN;
        assert!(validate_sale(&sale).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(0.0).is_ok());
        assert!(validate_tax_rate(12.0).is_ok());
        assert!(validate_tax_rate(100.0).is_ok());
        assert!(matches!(
            validate_tax_rate(-1.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_tax_rate(100.5).is_err());
        assert!(matches!(
            validate_tax_rate(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category(&Category::new("Drinks")).is_ok());
        assert!(validate_category(&Category::new(" ")).is_err());
    }
}
