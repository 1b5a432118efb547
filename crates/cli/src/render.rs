//! Plain-text rendering of store data for the terminal.

use std::fmt::Write as _;

use bookstore_core::{Book, CartView, CurrencyCode, Outcome, Receipt, SalesReport};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

/// Description characters shown in the book table.
const DESCRIPTION_PREVIEW_CHARS: usize = 30;

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Added")]
    added: String,
}

#[derive(Tabled)]
struct CartRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

#[derive(Tabled)]
struct SaleRow {
    #[tabled(rename = "Sale")]
    id: i32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Books")]
    books: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// The book listing as a table.
#[must_use]
pub fn books_table(books: &[Book], currency: CurrencyCode) -> String {
    let rows: Vec<BookRow> = books
        .iter()
        .map(|book| BookRow {
            id: book.id.as_i32(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.short_description(DESCRIPTION_PREVIEW_CHARS),
            stock: book.stock,
            price: book.price.display(currency),
            added: book.added_date.to_string(),
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..6)).with(Alignment::right()))
        .to_string()
}

/// Cart lines as a table followed by the total.
#[must_use]
pub fn cart_table(view: &CartView, currency: CurrencyCode) -> String {
    let rows: Vec<CartRow> = view
        .lines
        .iter()
        .map(|line| CartRow {
            id: line.book_id.as_i32(),
            title: line.title.clone(),
            price: line
                .unit_price
                .map_or_else(|| "-".to_owned(), |price| price.display(currency)),
            quantity: line.quantity,
            subtotal: line.subtotal.display(currency),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    format!("{table}\nTotal: {}", view.total.display(currency))
}

/// Receipt text shown after checkout.
#[must_use]
pub fn receipt(receipt: &Receipt, currency: CurrencyCode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Receipt #{}", receipt.sale_id);
    let _ = writeln!(out, "Date: {}", receipt.date);
    let _ = writeln!(out, "Customer: {}", receipt.customer);
    out.push('\n');
    for line in &receipt.lines {
        let _ = writeln!(
            out,
            "  {} x {} @ {}",
            line.quantity,
            line.title,
            line.price.display(currency)
        );
    }
    out.push('\n');
    let _ = write!(out, "Total: {}", receipt.total.display(currency));
    out
}

/// Sales history as a table followed by the summary.
#[must_use]
pub fn sales_table(report: &SalesReport, currency: CurrencyCode) -> String {
    let rows: Vec<SaleRow> = report
        .sales
        .iter()
        .map(|sale| SaleRow {
            id: sale.id.as_i32(),
            date: sale.date.format("%Y-%m-%d %H:%M").to_string(),
            customer: format!("{} ({})", sale.customer.name, sale.customer.email),
            books: sale
                .items
                .iter()
                .map(|item| format!("{} x {}", item.quantity, item.title))
                .collect::<Vec<_>>()
                .join(", "),
            total: sale.total.display(currency),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    format!(
        "{table}\nSales: {}  Books sold: {}  Revenue: {}",
        report.sale_count,
        report.books_sold,
        report.revenue.display(currency)
    )
}

/// The status message for an outcome, followed by any data it carries.
#[must_use]
pub fn outcome(outcome: &Outcome, currency: CurrencyCode) -> String {
    let message = outcome.message();
    let detail = match outcome {
        Outcome::Books { books, .. } if !books.is_empty() => Some(books_table(books, currency)),
        Outcome::Cart(view) if !view.is_empty() => Some(cart_table(view, currency)),
        Outcome::Receipt(r) => Some(receipt(r, currency)),
        Outcome::Sales(report) if !report.sales.is_empty() => {
            Some(sales_table(report, currency))
        }
        _ => None,
    };
    match detail {
        Some(detail) => format!("{message}\n{detail}"),
        None => message,
    }
}
