//! The bookstore application state.
//!
//! [`Bookstore`] owns every component. Presentation layers construct one
//! explicitly and pass it (or a lock around it) wherever it is needed.

use chrono::Utc;

use crate::admin::Admin;
use crate::cart::{Cart, CartLine, CartView};
use crate::catalog::{Book, BookFields, Catalog};
use crate::checkout;
use crate::error::StoreError;
use crate::sales::{Customer, Receipt, SalesHistory, SalesReport};
use crate::types::{AdminState, BookId, Credentials};

/// Catalog, cart, sales history and admin session for one store.
#[derive(Debug, Clone)]
pub struct Bookstore {
    catalog: Catalog,
    cart: Cart,
    sales: SalesHistory,
    admin: Admin,
}

impl Bookstore {
    /// Seed catalog, empty cart, empty sales history, logged-out admin.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_catalog(Catalog::with_seed_books(), credentials)
    }

    /// A store opening with the given catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, credentials: Credentials) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            sales: SalesHistory::new(),
            admin: Admin::new(credentials),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn sales(&self) -> &SalesHistory {
        &self.sales
    }

    #[must_use]
    pub const fn admin_state(&self) -> AdminState {
        self.admin.state()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin.is_logged_in()
    }

    // =========================================================================
    // Shop
    // =========================================================================

    /// See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Propagates the cart's validation errors.
    pub fn add_to_cart(&mut self, book_id: BookId, quantity: u32) -> Result<CartLine, StoreError> {
        self.cart.add_item(&self.catalog, book_id, quantity)
    }

    /// See [`Cart::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotInCart`] if the book has no line.
    pub fn remove_from_cart(&mut self, book_id: BookId) -> Result<CartLine, StoreError> {
        self.cart.remove_item(book_id)
    }

    #[must_use]
    pub fn view_cart(&self) -> CartView {
        self.cart.view(&self.catalog)
    }

    /// Buy everything in the cart. See [`checkout::checkout`].
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart`, `NotFound` or `OutOfStock`; nothing changes on
    /// error.
    pub fn checkout(&mut self, customer: Customer) -> Result<Receipt, StoreError> {
        checkout::checkout(
            &mut self.catalog,
            &mut self.cart,
            &mut self.sales,
            customer,
            Utc::now(),
        )
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] on mismatch.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        self.admin.login(username, password)
    }

    /// Returns whether the admin was logged in.
    pub fn logout(&mut self) -> bool {
        self.admin.logout()
    }

    /// Add a book to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unauthorized`] while logged out.
    pub fn add_book(&mut self, fields: BookFields) -> Result<&Book, StoreError> {
        self.admin.require_logged_in()?;
        let id = self.catalog.add(fields);
        tracing::info!(book_id = %id, "Book added");
        self.catalog.find(id).ok_or(StoreError::NotFound(id))
    }

    /// Overwrite a book's fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unauthorized`] while logged out or
    /// [`StoreError::NotFound`] for an unknown id.
    pub fn update_book(&mut self, id: BookId, fields: BookFields) -> Result<&Book, StoreError> {
        self.admin.require_logged_in()?;
        let book = self.catalog.update(id, fields)?;
        tracing::info!(book_id = %id, "Book updated");
        Ok(book)
    }

    /// Remove a book and any cart line that references it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unauthorized`] while logged out or
    /// [`StoreError::NotFound`] for an unknown id.
    pub fn remove_book(&mut self, id: BookId) -> Result<Book, StoreError> {
        self.admin.require_logged_in()?;
        let book = self.catalog.remove(id)?;
        if self.cart.discard_book(id) {
            tracing::info!(book_id = %id, "Dropped removed book from cart");
        }
        tracing::info!(book_id = %id, title = %book.title, "Book removed");
        Ok(book)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Unauthorized`] while logged out.
    pub fn sales_report(&self) -> Result<SalesReport, StoreError> {
        self.admin.require_logged_in()?;
        Ok(self.sales.report())
    }
}

impl Default for Bookstore {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{Email, Price};

    const AI_ML: BookId = BookId::new(2);

    fn logged_in() -> Bookstore {
        let mut store = Bookstore::default();
        store.login("admin", "1234").unwrap();
        store
    }

    fn fields(title: &str) -> BookFields {
        BookFields {
            title: title.to_owned(),
            author: "Author".to_owned(),
            description: "About things".to_owned(),
            stock: 3,
            price: Price::from_whole(150),
        }
    }

    #[test]
    fn test_initial_state() {
        let store = Bookstore::default();
        assert_eq!(store.catalog().len(), 5);
        assert!(store.cart().is_empty());
        assert!(store.sales().is_empty());
        assert_eq!(store.admin_state(), AdminState::LoggedOut);
    }

    #[test]
    fn test_purchase_example() {
        let mut store = Bookstore::default();
        let line = store.add_to_cart(AI_ML, 3).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.subtotal, Price::from_whole(1200));

        let customer = Customer::new("Ann", Email::parse("a@x.com").unwrap()).unwrap();
        let receipt = store.checkout(customer).unwrap();

        assert_eq!(store.catalog().find(AI_ML).unwrap().stock, 2);
        assert_eq!(store.sales().len(), 1);
        assert_eq!(receipt.total, Price::from_whole(1200));
        assert_eq!(receipt.customer, "Ann (a@x.com)");
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_admin_operations_require_login() {
        let mut store = Bookstore::default();
        assert_eq!(
            store.add_book(fields("Nope")).unwrap_err(),
            StoreError::Unauthorized
        );
        assert_eq!(
            store.remove_book(AI_ML).unwrap_err(),
            StoreError::Unauthorized
        );
        assert_eq!(
            store.update_book(AI_ML, fields("Nope")).unwrap_err(),
            StoreError::Unauthorized
        );
        assert_eq!(store.sales_report().unwrap_err(), StoreError::Unauthorized);
        assert_eq!(store.catalog().len(), 5);
    }

    #[test]
    fn test_wrong_credentials_leave_state_unchanged() {
        let mut store = Bookstore::default();
        store.add_to_cart(AI_ML, 1).unwrap();
        let customer = Customer::new("Ann", Email::parse("a@x.com").unwrap()).unwrap();
        store.checkout(customer).unwrap();
        store.add_to_cart(BookId::new(1), 2).unwrap();
        let before = store.clone();

        assert_eq!(
            store.login("admin", "4321").unwrap_err(),
            StoreError::InvalidCredentials
        );
        assert_eq!(
            store.login("Admin", "1234").unwrap_err(),
            StoreError::InvalidCredentials
        );

        assert!(!store.is_admin());
        assert_eq!(store.admin_state(), before.admin_state());
        assert_eq!(store.catalog().list(), before.catalog().list());
        assert_eq!(store.catalog().next_id(), before.catalog().next_id());
        assert_eq!(store.cart().lines(), before.cart().lines());
        assert_eq!(store.sales().sales(), before.sales().sales());
    }

    #[test]
    fn test_admin_crud() {
        let mut store = logged_in();
        let id = store.add_book(fields("Rust in Action")).unwrap().id;
        assert_eq!(id, BookId::new(6));

        let mut changed = fields("Rust in Action");
        changed.stock = 12;
        assert_eq!(store.update_book(id, changed).unwrap().stock, 12);

        let removed = store.remove_book(id).unwrap();
        assert_eq!(removed.title, "Rust in Action");
        assert!(store.catalog().find(id).is_none());
        assert_eq!(
            store.remove_book(id).unwrap_err(),
            StoreError::NotFound(id)
        );
    }

    #[test]
    fn test_removing_book_drops_cart_line() {
        let mut store = logged_in();
        store.add_to_cart(AI_ML, 1).unwrap();
        store.add_to_cart(BookId::new(1), 1).unwrap();
        store.remove_book(AI_ML).unwrap();

        assert_eq!(store.cart().len(), 1);
        assert!(store.cart().line(AI_ML).is_none());
    }

    #[test]
    fn test_sales_report_after_logout_is_unauthorized() {
        let mut store = logged_in();
        store.add_to_cart(AI_ML, 2).unwrap();
        let customer = Customer::new("Bo", Email::parse("bo@example.com").unwrap()).unwrap();
        store.checkout(customer).unwrap();

        let report = store.sales_report().unwrap();
        assert_eq!(report.sale_count, 1);
        assert_eq!(report.books_sold, 2);
        assert_eq!(report.revenue, Price::from_whole(800));

        assert!(store.logout());
        assert_eq!(store.sales_report().unwrap_err(), StoreError::Unauthorized);
    }
}
