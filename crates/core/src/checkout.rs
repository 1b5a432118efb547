//! Checkout: turns the cart into a recorded sale.

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::sales::{Customer, Receipt, Sale, SaleItem, SalesHistory};

/// Complete a purchase.
///
/// Every line is checked against the current catalog before anything is
/// touched, so a failed checkout leaves stock, cart and history unchanged.
/// On success each book's stock drops by its line quantity, one [`Sale`]
/// with snapshots of the purchased books is appended to `sales`, and the
/// cart is emptied.
///
/// # Errors
///
/// - [`StoreError::EmptyCart`] if there is nothing to buy
/// - [`StoreError::NotFound`] if a book in the cart has been removed
/// - [`StoreError::OutOfStock`] if stock fell below a line's quantity
pub fn checkout(
    catalog: &mut Catalog,
    cart: &mut Cart,
    sales: &mut SalesHistory,
    customer: Customer,
    now: DateTime<Utc>,
) -> Result<Receipt, StoreError> {
    if cart.is_empty() {
        return Err(StoreError::EmptyCart);
    }

    for line in cart.lines() {
        let book = catalog
            .find(line.book_id)
            .ok_or(StoreError::NotFound(line.book_id))?;
        if line.quantity > book.stock {
            return Err(StoreError::OutOfStock {
                book_id: book.id,
                title: book.title.clone(),
                requested: line.quantity,
                available: book.stock,
            });
        }
    }

    let mut items = Vec::with_capacity(cart.len());
    for line in cart.lines() {
        let book = catalog
            .find_mut(line.book_id)
            .ok_or(StoreError::NotFound(line.book_id))?;
        book.stock -= line.quantity;
        items.push(SaleItem {
            book_id: book.id,
            title: book.title.clone(),
            quantity: line.quantity,
            price: book.price,
        });
    }

    let sale = Sale {
        id: sales.next_id(),
        date: now,
        customer,
        items,
        total: cart.total(),
    };
    let receipt = Receipt::from(&sale);

    tracing::info!(
        sale_id = %sale.id,
        items = sale.items.len(),
        books = sale.books_sold(),
        total = %sale.total,
        "Checkout completed"
    );

    sales.record(sale);
    cart.clear();
    Ok(receipt)
}
