//! Shared page chrome and display types for templates.

use bookstore_core::{Book, Bookstore, CartView, CurrencyCode, Receipt};

use crate::models::Flash;

/// Number of description characters shown in book tables.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 30;

/// Data every page's layout needs: the flash banner and the nav bar.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub flash: Option<Flash>,
    pub cart_count: u32,
    pub is_admin: bool,
}

impl PageContext {
    /// Build the layout context from a locked store.
    #[must_use]
    pub fn new(store: &Bookstore, flash: Option<Flash>) -> Self {
        Self {
            flash,
            cart_count: store.cart().item_count(),
            is_admin: store.is_admin(),
        }
    }
}

/// Book display data for tables.
#[derive(Debug, Clone)]
pub struct BookRow {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: String,
    pub stock: u32,
    /// Out-of-stock books cannot be picked in the add-to-cart form.
    pub in_stock: bool,
    pub price: String,
    pub added_date: String,
}

impl BookRow {
    #[must_use]
    pub fn new(book: &Book, currency: CurrencyCode) -> Self {
        Self {
            id: book.id.as_i32(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.short_description(DESCRIPTION_PREVIEW_CHARS),
            stock: book.stock,
            in_stock: book.in_stock(),
            price: book.price.display(currency),
            added_date: book.added_date.to_string(),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLineRow {
    pub book_id: i32,
    pub title: String,
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartDisplay {
    pub lines: Vec<CartLineRow>,
    pub total: String,
    pub item_count: u32,
}

impl CartDisplay {
    #[must_use]
    pub fn new(view: &CartView, currency: CurrencyCode) -> Self {
        Self {
            lines: view
                .lines
                .iter()
                .map(|line| CartLineRow {
                    book_id: line.book_id.as_i32(),
                    title: line.title.clone(),
                    unit_price: line
                        .unit_price
                        .map_or_else(|| "-".to_string(), |p| p.display(currency)),
                    quantity: line.quantity,
                    subtotal: line.subtotal.display(currency),
                })
                .collect(),
            total: view.total.display(currency),
            item_count: view.item_count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Receipt line display data.
#[derive(Debug, Clone)]
pub struct ReceiptLineRow {
    pub quantity: u32,
    pub title: String,
    pub price: String,
}

/// Receipt display data.
#[derive(Debug, Clone)]
pub struct ReceiptDisplay {
    pub sale_id: i32,
    pub date: String,
    pub customer: String,
    pub lines: Vec<ReceiptLineRow>,
    pub total: String,
}

impl ReceiptDisplay {
    #[must_use]
    pub fn new(receipt: &Receipt, currency: CurrencyCode) -> Self {
        Self {
            sale_id: receipt.sale_id.as_i32(),
            date: receipt.date.clone(),
            customer: receipt.customer.clone(),
            lines: receipt
                .lines
                .iter()
                .map(|line| ReceiptLineRow {
                    quantity: line.quantity,
                    title: line.title.clone(),
                    price: line.price.display(currency),
                })
                .collect(),
            total: receipt.total.display(currency),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookstore_core::BookId;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_book_row_truncates_description() {
        let store = Bookstore::default();
        let book = store.catalog().find(BookId::new(2)).unwrap();
        let row = BookRow::new(book, CurrencyCode::Inr);
        assert_eq!(row.description, "Fundamentals of AI and Machine...");
        assert_eq!(row.price, "Rs.400.00");
        assert!(row.in_stock);
    }

    #[test]
    fn test_book_row_marks_sold_out_books() {
        let mut store = Bookstore::default();
        store.login("admin", "1234").unwrap();
        let id = BookId::new(5);
        let mut fields = bookstore_core::BookDraft::from_book(store.catalog().find(id).unwrap())
            .validate()
            .unwrap();
        fields.stock = 0;
        store.update_book(id, fields).unwrap();

        let row = BookRow::new(store.catalog().find(id).unwrap(), CurrencyCode::Inr);
        assert!(!row.in_stock);
        assert_eq!(row.stock, 0);
    }

    #[test]
    fn test_cart_display_formats_prices() {
        let mut store = Bookstore::default();
        store.add_to_cart(BookId::new(2), 3).unwrap();
        let display = CartDisplay::new(&store.view_cart(), CurrencyCode::Usd);
        assert_eq!(display.total, "$1200.00");
        assert_eq!(display.lines[0].unit_price, "$400.00");
        assert_eq!(display.item_count, 3);
    }
}
