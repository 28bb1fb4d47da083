//! Cart summary

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{TotalPriceError, to_money},
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("failed to write cart summary: {0}")]
    Io(#[from] io::Error),

    /// Total price calculation error
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Cart page view of a cart: its lines, subtotal, shipping and total.
#[derive(Debug, Clone, Copy)]
pub struct CartSummary<'a> {
    cart: &'a Cart,
    currency: &'static Currency,
}

impl<'a> CartSummary<'a> {
    /// Summarise `cart` with prices in `currency`.
    pub fn new(cart: &'a Cart, currency: &'static Currency) -> Self {
        Self { cart, currency }
    }

    /// Writes the summary table and totals.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a total cannot be calculated or the
    /// output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.cart.is_empty() {
            writeln!(out, "Your cart is currently empty.")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Color", "Qty", "Unit Price", "Line Total"]);

        for line in self.cart {
            builder.push_record([
                line.title.clone(),
                line.color.clone(),
                line.quantity.to_string(),
                to_money(line.unit_price, self.currency).to_string(),
                to_money(line.line_total()?, self.currency).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;

        let total = to_money(self.cart.total()?, self.currency);

        writeln!(out, " Subtotal: {total}")?;
        writeln!(out, " Shipping: Free")?;
        writeln!(out, " \x1b[1mTotal:\x1b[0m    {total}")?;

        Ok(())
    }
}
