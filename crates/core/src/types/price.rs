//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never negative. Arithmetic stays in [`Decimal`] so subtotals
//! and revenue sums do not accumulate floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input is not a decimal number.
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
    /// The amount is above [`Price::MAX_UNITS`].
    #[error("price cannot exceed {}", Price::MAX_UNITS)]
    TooLarge,
}

/// A non-negative monetary amount.
///
/// The currency is a display concern (see [`CurrencyCode`]); every price in
/// one store shares the same currency.
///
/// ```
/// use bookstore_core::{CurrencyCode, Price};
///
/// let price = Price::from_whole(400);
/// assert_eq!(price.times(3), Price::from_whole(1200));
/// assert_eq!(price.display(CurrencyCode::Inr), "Rs.400.00");
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price, in whole currency units. Keeps
    /// `price * quantity` and revenue sums far inside `Decimal` range.
    pub const MAX_UNITS: u64 = 10_000_000_000;

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Self::MAX_UNITS`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Decimal::from(Self::MAX_UNITS) {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount.normalize()))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_whole(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price from user input such as `"250"` or `"19.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a number, is negative or is
    /// above [`Self::MAX_UNITS`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// This price multiplied by a quantity. Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format for display with the given currency, e.g. `Rs.400.00`.
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        format!("{}{:.2}", currency.symbol(), self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// ISO 4217 currency codes the store can display prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl CurrencyCode {
    /// Prefix used when rendering amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "Rs.",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::Inr),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(Price::parse("250").unwrap(), Price::from_whole(250));
        assert_eq!(
            Price::parse(" 19.99 ").unwrap().amount(),
            Decimal::new(1999, 2)
        );
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage_and_negative() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse(""), Err(PriceError::Invalid(_))));
        assert!(matches!(Price::parse("-5"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_rejects_amounts_above_max() {
        assert_eq!(
            Price::parse("79228162514264337593543950335"),
            Err(PriceError::TooLarge)
        );
        assert_eq!(Price::parse("10000000000.01"), Err(PriceError::TooLarge));
        let max = Price::parse("10000000000").unwrap();
        assert_eq!(
            max.times(u32::MAX).amount(),
            Decimal::from_str("42949672950000000000").unwrap()
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Price(Decimal::MAX);
        assert_eq!(huge.times(2).amount(), Decimal::MAX);
        assert_eq!((huge + Price::from_whole(1)).amount(), Decimal::MAX);
        let mut total = huge;
        total += huge;
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let price = Price::new(Decimal::NEGATIVE_ONE * Decimal::ZERO).unwrap();
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from_whole(400).times(3), Price::parse("0.50").unwrap()]
            .iter()
            .sum();
        assert_eq!(total, Price::parse("1200.5").unwrap());
    }

    #[test]
    fn test_display_with_currency() {
        let price = Price::parse("1200").unwrap();
        assert_eq!(price.display(CurrencyCode::Inr), "Rs.1200.00");
        assert_eq!(price.display(CurrencyCode::Usd), "$1200.00");
        assert_eq!(price.to_string(), "1200.00");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Price = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(ok, Price::parse("12.5").unwrap());
        assert!(serde_json::from_str::<Price>("\"-3\"").is_err());
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<CurrencyCode>().unwrap(), CurrencyCode::Inr);
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
