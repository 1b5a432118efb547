//! The shopping cart.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::types::{BookId, Price};

/// Title shown for a cart line whose book has since been removed.
pub const UNAVAILABLE_TITLE: &str = "(no longer available)";

/// One book in the cart.
///
/// `subtotal` is fixed at the prices in effect when each quantity was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub book_id: BookId,
    pub quantity: u32,
    pub subtotal: Price,
}

/// The current session's uncommitted selection.
///
/// Holds at most one line per book; adding a book that is already in the
/// cart merges into its line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` copies of a book.
    ///
    /// The merged quantity of the line must not exceed the book's current
    /// stock.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidQuantity`] if `quantity` is zero
    /// - [`StoreError::NotFound`] if the book does not exist
    /// - [`StoreError::OutOfStock`] if the stock cannot cover the line
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        book_id: BookId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity);
        }
        let book = catalog.find(book_id).ok_or(StoreError::NotFound(book_id))?;

        let already = self.line(book_id).map_or(0, |line| line.quantity);
        let requested = already.saturating_add(quantity);
        if requested > book.stock {
            return Err(StoreError::OutOfStock {
                book_id,
                title: book.title.clone(),
                requested,
                available: book.stock,
            });
        }

        let added = book.price.times(quantity);
        if let Some(line) = self.lines.iter_mut().find(|l| l.book_id == book_id) {
            line.quantity = requested;
            line.subtotal += added;
            return Ok(*line);
        }

        let line = CartLine {
            book_id,
            quantity,
            subtotal: added,
        };
        self.lines.push(line);
        Ok(line)
    }

    /// Remove a book's line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotInCart`] if the book has no line.
    pub fn remove_item(&mut self, book_id: BookId) -> Result<CartLine, StoreError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.book_id == book_id)
            .ok_or(StoreError::NotInCart(book_id))?;
        Ok(self.lines.remove(index))
    }

    /// The line for a book, if any.
    #[must_use]
    pub fn line(&self, book_id: BookId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.book_id == book_id)
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|l| l.subtotal).sum()
    }

    /// Total number of copies across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Drop the line for a book that left the catalog. Returns whether a
    /// line was dropped.
    pub(crate) fn discard_book(&mut self, book_id: BookId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.book_id != book_id);
        before != self.lines.len()
    }

    /// All lines with live titles and unit prices, plus the total.
    #[must_use]
    pub fn view(&self, catalog: &Catalog) -> CartView {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let book = catalog.find(line.book_id);
                CartLineView {
                    book_id: line.book_id,
                    title: book.map_or_else(|| UNAVAILABLE_TITLE.to_owned(), |b| b.title.clone()),
                    unit_price: book.map(|b| b.price),
                    quantity: line.quantity,
                    subtotal: line.subtotal,
                }
            })
            .collect();

        CartView {
            lines,
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub book_id: BookId,
    pub title: String,
    /// Current catalog price; `None` if the book was removed.
    pub unit_price: Option<Price>,
    pub quantity: u32,
    pub subtotal: Price,
}

/// The cart as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Price,
    pub item_count: u32,
}

impl CartView {
    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::BookFields;

    const AI_ML: BookId = BookId::new(2);

    #[test]
    fn test_add_creates_line_with_subtotal() {
        let catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        let line = cart.add_item(&catalog, AI_ML, 3).unwrap();
        assert_eq!(
            line,
            CartLine {
                book_id: AI_ML,
                quantity: 3,
                subtotal: Price::from_whole(1200),
            }
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_re_adding_merges_quantity_and_subtotal() {
        let catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        cart.add_item(&catalog, BookId::new(1), 2).unwrap();
        cart.add_item(&catalog, BookId::new(1), 3).unwrap();

        assert_eq!(cart.len(), 1);
        let line = cart.line(BookId::new(1)).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.subtotal, Price::from_whole(1250));
    }

    #[test]
    fn test_merged_subtotal_uses_price_at_each_add() {
        let mut catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        cart.add_item(&catalog, AI_ML, 1).unwrap();

        let mut fields = BookFields::from(catalog.find(AI_ML).unwrap());
        fields.price = Price::from_whole(500);
        catalog.update(AI_ML, fields).unwrap();
        cart.add_item(&catalog, AI_ML, 1).unwrap();

        assert_eq!(cart.line(AI_ML).unwrap().subtotal, Price::from_whole(900));
    }

    #[test]
    fn test_rejects_quantity_above_stock() {
        let catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        let err = cart.add_item(&catalog, AI_ML, 6).unwrap_err();
        assert!(matches!(
            err,
            StoreError::OutOfStock {
                requested: 6,
                available: 5,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_top_priced_book_adds_without_overflow() {
        let top = Price::parse("10000000000").unwrap();
        let mut catalog = Catalog::new();
        let id = catalog.add(BookFields {
            title: "Collector's Edition".to_owned(),
            author: String::new(),
            description: String::new(),
            stock: u32::MAX,
            price: top,
        });

        let mut cart = Cart::new();
        cart.add_item(&catalog, id, u32::MAX - 1).unwrap();
        cart.add_item(&catalog, id, 1).unwrap();
        assert_eq!(cart.total(), top.times(u32::MAX));
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_rejects_merge_that_would_exceed_stock() {
        let catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        cart.add_item(&catalog, AI_ML, 3).unwrap();
        let err = cart.add_item(&catalog, AI_ML, 3).unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock { requested: 6, .. }));
        assert_eq!(cart.line(AI_ML).unwrap().quantity, 3);
    }

    #[test]
    fn test_rejects_unknown_book_and_zero_quantity() {
        let catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(&catalog, BookId::new(42), 1).unwrap_err(),
            StoreError::NotFound(BookId::new(42))
        );
        assert_eq!(
            cart.add_item(&catalog, AI_ML, 0).unwrap_err(),
            StoreError::InvalidQuantity
        );
    }

    #[test]
    fn test_out_of_stock_book() {
        let mut catalog = Catalog::new();
        let id = catalog.add(BookFields {
            title: "Sold Out".to_owned(),
            author: String::new(),
            description: String::new(),
            stock: 0,
            price: Price::from_whole(10),
        });
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&catalog, id, 1),
            Err(StoreError::OutOfStock { available: 0, .. })
        ));
    }

    #[test]
    fn test_view_resolves_titles_and_total() {
        let mut catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        cart.add_item(&catalog, BookId::new(1), 1).unwrap();
        cart.add_item(&catalog, AI_ML, 2).unwrap();
        catalog.remove(BookId::new(1)).unwrap();

        let view = cart.view(&catalog);
        assert_eq!(view.total, Price::from_whole(1050));
        assert_eq!(view.item_count, 3);
        let titles: Vec<&str> = view.lines.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec![UNAVAILABLE_TITLE, "AI & ML"]);
        assert_eq!(view.lines[0].unit_price, None);
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = Catalog::with_seed_books();
        let mut cart = Cart::new();
        cart.add_item(&catalog, BookId::new(1), 1).unwrap();
        cart.add_item(&catalog, AI_ML, 1).unwrap();

        assert_eq!(cart.remove_item(BookId::new(1)).unwrap().book_id, BookId::new(1));
        assert_eq!(
            cart.remove_item(BookId::new(1)).unwrap_err(),
            StoreError::NotInCart(BookId::new(1))
        );
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}
