//! # Sales Export
//!
//! Renders a sales history as CSV for spreadsheets and bookkeeping.
//!
//! ## Format
//! ```text
//! "Date","Sale ID","Items","Subtotal","Tax","Total","Payment Method"
//! "2026-03-01T09:00:00Z","3f2a9c1e","Cola x2; Chips x1","11.00","1.32","12.32","cash"
//! ```
//! Every field is quoted. The sale id is shortened to its first 8
//! characters, which is what receipts print.

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{CoreError, CoreResult};
use crate::types::Sale;

const HEADERS: [&str; 7] = [
    "Date",
    "Sale ID",
    "Items",
    "Subtotal",
    "Tax",
    "Total",
    "Payment Method",
];

const SHORT_ID_LEN: usize = 8;

/// Renders `sales` as a CSV document, in the order given.
pub fn sales_to_csv(sales: &[Sale]) -> CoreResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for sale in sales {
        let short_id: String = sale.id.chars().take(SHORT_ID_LEN).collect();
        let items = sale
            .items
            .iter()
            .map(|item| format!("{} x{}", item.product_name, item.quantity))
            .collect::<Vec<_>>()
            .join("; ");

        writer.write_record([
            sale.created_at.clone(),
            short_id,
            items,
            format!("{:.2}", sale.subtotal),
            format!("{:.2}", sale.tax),
            format!("{:.2}", sale.total),
            sale.payment_method.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItem;

    #[test]
    fn test_sales_to_csv() {
        let mut sale = Sale::new("cash");
        sale.id = "3f2a9c1e-0000-4000-8000-000000000000".to_string();
        sale.created_at = "2026-03-01T09:00:00Z".to_string();
        sale.items = vec![
            SaleItem::new("p1", "Cola", 2, 5.0),
            SaleItem::new("p2", "Chips, salted", 1, 1.0),
        ];
        sale.subtotal = 11.0;
        sale.tax = 1.32;
        sale.total = 12.32;

        let csv = sales_to_csv(&[sale]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            r#""Date","Sale ID","Items","Subtotal","Tax","Total","Payment Method""#
        );
        assert_eq!(
            lines[1],
            r#""2026-03-01T09:00:00Z","3f2a9c1e","Cola x2; Chips, salted x1","11.00","1.32","12.32","cash""#
        );
    }

    #[test]
    fn test_empty_history_has_header_only() {
        let csv = sales_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
