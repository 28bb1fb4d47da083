//! Storefront
//!
//! Client-side cart for a small storefront: an explicitly owned cart store with
//! durable, best-effort persistence, derived totals, and a checkout hand-off to
//! an external order submitter.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod observability;
pub mod persistence;
pub mod pricing;
pub mod products;
pub mod summary;

pub use cart::{Cart, CartLineItem, CartStore, LineKey};
pub use products::{Product, ProductId};
