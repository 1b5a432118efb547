//! Explicit commands for every user action.
//!
//! Presentation layers collect raw text (form fields, shell arguments),
//! validate it into a [`Command`] with the draft types and parse helpers in
//! this module, and hand the command to [`Bookstore::execute`]. Every
//! [`Outcome`] carries a user-facing status message.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::cart::CartView;
use crate::catalog::{Book, BookFields};
use crate::error::{StoreError, ValidationError};
use crate::sales::{Customer, Receipt, SalesReport};
use crate::store::Bookstore;
use crate::types::{BookId, Email, Price};

/// One user action against the store.
#[derive(Debug, Clone)]
pub enum Command {
    ListBooks,
    Search { term: String },
    AddToCart { book_id: BookId, quantity: u32 },
    RemoveFromCart { book_id: BookId },
    ViewCart,
    Checkout { customer: Customer },
    AdminLogin { username: String, password: SecretString },
    AdminLogout,
    AddBook(BookFields),
    UpdateBook { id: BookId, fields: BookFields },
    RemoveBook { id: BookId },
    ViewSales,
}

impl Command {
    /// Snake-case name, used as a tracing field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListBooks => "list_books",
            Self::Search { .. } => "search",
            Self::AddToCart { .. } => "add_to_cart",
            Self::RemoveFromCart { .. } => "remove_from_cart",
            Self::ViewCart => "view_cart",
            Self::Checkout { .. } => "checkout",
            Self::AdminLogin { .. } => "admin_login",
            Self::AdminLogout => "admin_logout",
            Self::AddBook(_) => "add_book",
            Self::UpdateBook { .. } => "update_book",
            Self::RemoveBook { .. } => "remove_book",
            Self::ViewSales => "view_sales",
        }
    }
}

/// The result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A book listing; `query` is set for search results.
    Books {
        books: Vec<Book>,
        query: Option<String>,
    },
    Cart(CartView),
    AddedToCart { title: String, quantity: u32 },
    RemovedFromCart { title: String },
    Receipt(Receipt),
    LoggedIn,
    LoggedOut,
    BookAdded { id: BookId, title: String },
    BookUpdated { id: BookId, title: String },
    BookRemoved { book: Book },
    Sales(SalesReport),
}

impl Outcome {
    /// Status message to show the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Books { books, query: None } => format!("{} books available", books.len()),
            Self::Books { books, query: Some(_) } if books.is_empty() => {
                "No books found matching your search.".to_owned()
            }
            Self::Books { books, query: Some(_) } => format!("Found {} books:", books.len()),
            Self::Cart(view) if view.is_empty() => "Your cart is empty".to_owned(),
            Self::Cart(view) => format!("{} items in your cart", view.item_count),
            Self::AddedToCart { title, quantity } => {
                format!("Added {quantity} x '{title}' to cart")
            }
            Self::RemovedFromCart { title } => format!("Removed '{title}' from cart"),
            Self::Receipt(_) => "Thank you for your purchase!".to_owned(),
            Self::LoggedIn => "Logged in successfully".to_owned(),
            Self::LoggedOut => "Logged out".to_owned(),
            Self::BookAdded { id, title } => {
                format!("Book '{title}' added successfully with ID {id}.")
            }
            Self::BookUpdated { .. } => "Book updated successfully".to_owned(),
            Self::BookRemoved { .. } => "Book removed successfully".to_owned(),
            Self::Sales(report) if report.sales.is_empty() => "No sales recorded yet".to_owned(),
            Self::Sales(report) => format!("{} sales recorded", report.sale_count),
        }
    }
}

impl Bookstore {
    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns whatever [`StoreError`] the underlying component reports. The
    /// store is unchanged when an error is returned.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, StoreError> {
        let name = command.name();
        let result = self.dispatch(command);
        if let Err(err) = &result {
            tracing::debug!(command = name, kind = err.kind(), error = %err, "Command rejected");
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<Outcome, StoreError> {
        match command {
            Command::ListBooks => Ok(Outcome::Books {
                books: self.catalog().list().into_iter().cloned().collect(),
                query: None,
            }),
            Command::Search { term } => Ok(Outcome::Books {
                books: self.catalog().search(&term).into_iter().cloned().collect(),
                query: Some(term.trim().to_owned()),
            }),
            Command::AddToCart { book_id, quantity } => {
                self.add_to_cart(book_id, quantity)?;
                Ok(Outcome::AddedToCart {
                    title: self.book_title(book_id),
                    quantity,
                })
            }
            Command::RemoveFromCart { book_id } => {
                self.remove_from_cart(book_id)?;
                Ok(Outcome::RemovedFromCart {
                    title: self.book_title(book_id),
                })
            }
            Command::ViewCart => Ok(Outcome::Cart(self.view_cart())),
            Command::Checkout { customer } => self.checkout(customer).map(Outcome::Receipt),
            Command::AdminLogin { username, password } => {
                self.login(&username, password.expose_secret())?;
                Ok(Outcome::LoggedIn)
            }
            Command::AdminLogout => {
                self.logout();
                Ok(Outcome::LoggedOut)
            }
            Command::AddBook(fields) => {
                let book = self.add_book(fields)?;
                Ok(Outcome::BookAdded {
                    id: book.id,
                    title: book.title.clone(),
                })
            }
            Command::UpdateBook { id, fields } => {
                let book = self.update_book(id, fields)?;
                Ok(Outcome::BookUpdated {
                    id,
                    title: book.title.clone(),
                })
            }
            Command::RemoveBook { id } => {
                let book = self.remove_book(id)?;
                Ok(Outcome::BookRemoved { book })
            }
            Command::ViewSales => self.sales_report().map(Outcome::Sales),
        }
    }

    fn book_title(&self, id: BookId) -> String {
        self.catalog()
            .find(id)
            .map_or_else(|| crate::cart::UNAVAILABLE_TITLE.to_owned(), |b| b.title.clone())
    }
}

// =============================================================================
// Raw input
// =============================================================================

/// Unvalidated add/edit book form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
    pub stock: String,
    pub price: String,
}

impl BookDraft {
    /// Pre-fill the edit form from an existing book.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            stock: book.stock.to_string(),
            price: book.price.to_string(),
        }
    }

    /// Check the form and produce book fields.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: blank title, a stock that is not a
    /// non-negative integer, or a price that is not a non-negative amount.
    pub fn validate(&self) -> Result<BookFields, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Required { field: "Title" });
        }
        let stock = parse_count("Stock", &self.stock)?;
        let price = Price::parse(&self.price)?;
        Ok(BookFields {
            title: title.to_owned(),
            author: self.author.clone(),
            description: self.description.clone(),
            stock,
            price,
        })
    }
}

/// Unvalidated checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutDraft {
    pub name: String,
    pub email: String,
}

impl CheckoutDraft {
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] for a blank name, then
    /// [`ValidationError::Email`] for a malformed address.
    pub fn validate(&self) -> Result<Customer, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required { field: "Name" });
        }
        let email = Email::parse(&self.email)?;
        Customer::new(&self.name, email)
    }
}

/// Parse a cart quantity. Zero is accepted here and rejected by the cart.
///
/// # Errors
///
/// Returns [`ValidationError::NotANumber`] unless the input is a
/// non-negative integer.
pub fn parse_quantity(input: &str) -> Result<u32, ValidationError> {
    parse_count("Quantity", input)
}

/// Parse a book id.
///
/// # Errors
///
/// Returns [`ValidationError::NotANumber`] unless the input is an integer.
pub fn parse_book_id(input: &str) -> Result<BookId, ValidationError> {
    input
        .trim()
        .parse::<i32>()
        .map(BookId::new)
        .map_err(|_| ValidationError::NotANumber {
            field: "Book ID",
            value: input.trim().to_owned(),
        })
}

fn parse_count(field: &'static str, input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    trimmed.parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: trimmed.to_owned(),
    })
}
