//! Prices

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{cart::CartLineItem, products::ProductId};

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// `unit_price × quantity` is outside the decimal range.
    #[error("line total for product {0} is too large")]
    LineOverflow(ProductId),

    /// The sum of the line totals is outside the decimal range.
    #[error("cart total is too large")]
    Overflow,
}

/// Calculates the total for a single line: `unit_price × quantity`.
///
/// # Errors
///
/// Returns [`TotalPriceError::LineOverflow`] if the product does not fit in a
/// [`Decimal`].
pub fn line_total(item: &CartLineItem) -> Result<Decimal, TotalPriceError> {
    item.unit_price
        .checked_mul(Decimal::from(item.quantity))
        .ok_or(TotalPriceError::LineOverflow(item.product_id))
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals zero.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if a line total or the running sum overflows.
pub fn cart_total(items: &[CartLineItem]) -> Result<Decimal, TotalPriceError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(line_total(item)?).ok_or(TotalPriceError::Overflow)
    })
}

/// Wraps an amount in the given currency for display.
pub fn to_money(amount: Decimal, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_decimal(amount, currency)
}

/// Resolves an ISO 4217 code to a supported currency.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Some(iso::INR),
        "GBP" => Some(iso::GBP),
        "USD" => Some(iso::USD),
        "EUR" => Some(iso::EUR),
        _ => None,
    }
}
