//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a stock count, flagging sold-out books.
///
/// Usage in templates: `{{ book.stock|stock_label }}`
#[askama::filter_fn]
pub fn stock_label(stock: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let stock = stock.to_string();
    if stock == "0" {
        Ok("Out of stock".to_string())
    } else {
        Ok(stock)
    }
}
