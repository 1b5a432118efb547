//! Bookstore Core - catalog, cart, checkout and admin domain.
//!
//! This crate holds everything the bookstore knows about books and sales:
//! - `storefront` - server-rendered web UI for the shop and admin panel
//! - `cli` - terminal front end with one-shot commands and an interactive shell
//!
//! # Architecture
//!
//! All state is in memory and owned by one explicitly constructed
//! [`Bookstore`]. No I/O, no HTTP. Front ends validate raw input into a
//! [`Command`] and call [`Bookstore::execute`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, credentials and statuses
//! - [`catalog`] - Book records, id allocation and search
//! - [`cart`] - Cart lines and the cart view
//! - [`checkout`] - Turning the cart into a sale
//! - [`sales`] - Sales history, reports and receipts
//! - [`admin`] - Admin login state
//! - [`store`] - The [`Bookstore`] application state
//! - [`command`] - Commands, outcomes and raw-input validation
//! - [`error`] - [`StoreError`] and [`ValidationError`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod command;
pub mod error;
pub mod sales;
pub mod store;
pub mod types;

pub use admin::Admin;
pub use cart::{Cart, CartLine, CartLineView, CartView};
pub use catalog::{Book, BookFields, Catalog};
pub use command::{BookDraft, CheckoutDraft, Command, Outcome, parse_book_id, parse_quantity};
pub use error::{StoreError, ValidationError};
pub use sales::{Customer, Receipt, ReceiptLine, Sale, SaleItem, SalesHistory, SalesReport};
pub use store::Bookstore;
pub use types::*;
