//! Sales history, reports and receipts.
//!
//! A [`Sale`] stores snapshots of the purchased books, never references, so
//! later catalog edits do not rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{BookId, Email, Price, SaleId};

/// The buyer named at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: Email,
}

impl Customer {
    /// Create a customer, trimming the name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if the name is blank.
    pub fn new(name: &str, email: Email) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required { field: "Name" });
        }
        Ok(Self {
            name: name.to_owned(),
            email,
        })
    }
}

/// A purchased book as it was at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub book_id: BookId,
    pub title: String,
    pub quantity: u32,
    pub price: Price,
}

impl SaleItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A completed purchase. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub date: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<SaleItem>,
    /// Sum of the cart subtotals at checkout.
    pub total: Price,
}

impl Sale {
    /// Number of copies sold in this sale.
    #[must_use]
    pub fn books_sold(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity))
    }
}

/// Append-only list of sales.
#[derive(Debug, Clone, Default)]
pub struct SalesHistory {
    sales: Vec<Sale>,
}

impl SalesHistory {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next recorded sale will receive.
    #[must_use]
    pub fn next_id(&self) -> SaleId {
        self.sales
            .last()
            .map_or(SaleId::new(1), |sale| sale.id.next())
    }

    /// Append a sale.
    pub(crate) fn record(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    /// All sales, oldest first.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Number of recorded sales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Whether nothing has been sold yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sales with aggregate totals.
    #[must_use]
    pub fn report(&self) -> SalesReport {
        SalesReport {
            sales: self.sales.clone(),
            sale_count: self.sales.len(),
            books_sold: self.sales.iter().map(|s| u64::from(s.books_sold())).sum(),
            revenue: self.sales.iter().map(|s| s.total).sum(),
        }
    }
}

/// The admin sales view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    pub sales: Vec<Sale>,
    pub sale_count: usize,
    pub books_sold: u64,
    pub revenue: Price,
}

/// Format used for receipt timestamps.
pub const RECEIPT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub quantity: u32,
    pub title: String,
    pub price: Price,
}

/// The customer-facing view of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub sale_id: SaleId,
    pub date: String,
    pub customer: String,
    pub lines: Vec<ReceiptLine>,
    pub total: Price,
}

impl From<&Sale> for Receipt {
    fn from(sale: &Sale) -> Self {
        Self {
            sale_id: sale.id,
            date: sale.date.format(RECEIPT_DATE_FORMAT).to_string(),
            customer: format!("{} ({})", sale.customer.name, sale.customer.email),
            lines: sale
                .items
                .iter()
                .map(|item| ReceiptLine {
                    quantity: item.quantity,
                    title: item.title.clone(),
                    price: item.price,
                })
                .collect(),
            total: sale.total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sale(id: i32, items: Vec<(&str, u32, u32)>) -> Sale {
        let items: Vec<SaleItem> = items
            .into_iter()
            .enumerate()
            .map(|(i, (title, quantity, price))| SaleItem {
                book_id: BookId::new(i32::try_from(i).unwrap() + 1),
                title: title.to_owned(),
                quantity,
                price: Price::from_whole(price),
            })
            .collect();
        Sale {
            id: SaleId::new(id),
            date: Utc.with_ymd_and_hms(2025, 3, 4, 10, 30, 0).unwrap(),
            customer: Customer::new("Ann", Email::parse("a@x.com").unwrap()).unwrap(),
            total: items.iter().map(SaleItem::subtotal).sum(),
            items,
        }
    }

    #[test]
    fn test_customer_requires_name() {
        let email = Email::parse("a@x.com").unwrap();
        assert_eq!(
            Customer::new("  ", email.clone()).unwrap_err(),
            ValidationError::Required { field: "Name" }
        );
        assert_eq!(Customer::new(" Ann ", email).unwrap().name, "Ann");
    }

    #[test]
    fn test_next_id_is_sequential() {
        let mut history = SalesHistory::new();
        assert_eq!(history.next_id(), SaleId::new(1));
        history.record(sale(1, vec![("AI & ML", 1, 400)]));
        assert_eq!(history.next_id(), SaleId::new(2));
    }

    #[test]
    fn test_report_aggregates() {
        let mut history = SalesHistory::new();
        history.record(sale(1, vec![("AI & ML", 3, 400)]));
        history.record(sale(2, vec![("Python Basics", 1, 250), ("Data Science", 2, 300)]));

        let report = history.report();
        assert_eq!(report.sale_count, 2);
        assert_eq!(report.books_sold, 6);
        assert_eq!(report.revenue, Price::from_whole(2050));
        assert_eq!(report.sales.len(), 2);
    }

    #[test]
    fn test_empty_report() {
        let report = SalesHistory::new().report();
        assert_eq!(report.sale_count, 0);
        assert_eq!(report.books_sold, 0);
        assert_eq!(report.revenue, Price::ZERO);
    }

    #[test]
    fn test_receipt_from_sale() {
        let receipt = Receipt::from(&sale(7, vec![("AI & ML", 3, 400)]));
        assert_eq!(
            receipt,
            Receipt {
                sale_id: SaleId::new(7),
                date: "2025-03-04 10:30:00".to_owned(),
                customer: "Ann (a@x.com)".to_owned(),
                lines: vec![ReceiptLine {
                    quantity: 3,
                    title: "AI & ML".to_owned(),
                    price: Price::from_whole(400),
                }],
                total: Price::from_whole(1200),
            }
        );
    }
}
