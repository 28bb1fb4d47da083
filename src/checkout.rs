//! Checkout
//!
//! Turns the current cart into an order for the checkout submitter. The cart
//! is only read while the order is built and is emptied once the submitter
//! accepts it.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartStore},
    persistence::CartPersistence,
    pricing::TotalPriceError,
    products::ProductId,
};

/// Errors that stop an order from being placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nobody is signed in.
    #[error("You must be logged in to checkout.")]
    NotAuthenticated,

    /// There is nothing to order.
    #[error("Your cart is empty.")]
    EmptyCart,

    /// The submitter did not accept the order.
    #[error("Error placing order: {0}")]
    Rejected(String),

    /// The cart total cannot be represented.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Authenticated customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Backend user identifier
    pub user_id: String,
}

impl Identity {
    /// Identity for the given user identifier.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Identifier the submitter assigned to a stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wraps a raw order identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Status a new order is submitted with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet processed
    #[default]
    Pending,
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog product
    pub product_id: ProductId,

    /// Units purchased
    pub quantity: u32,

    /// Unit price the customer saw in the cart
    pub unit_price_at_purchase: Decimal,

    /// Colour variant
    pub color: String,
}

/// Order handed to the checkout submitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Customer placing the order
    pub customer_id: String,

    /// Cart total at checkout
    pub total_price: Decimal,

    /// Initial status
    pub status: OrderStatus,

    /// Purchased lines in cart order
    pub items: Vec<OrderLine>,
}

impl NewOrder {
    /// Snapshots `cart` for `customer`.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the cart total cannot be represented.
    pub fn from_cart(cart: &Cart, customer: &Identity) -> Result<Self, TotalPriceError> {
        Ok(Self {
            customer_id: customer.user_id.clone(),
            total_price: cart.total()?,
            status: OrderStatus::Pending,
            items: cart
                .iter()
                .map(|line| OrderLine {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price_at_purchase: line.unit_price,
                    color: line.color.clone(),
                })
                .collect(),
        })
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Stored order identifier
    pub id: OrderId,

    /// Amount charged
    pub total: Decimal,
}

/// Persists finalised orders remotely.
#[automock]
#[async_trait]
pub trait CheckoutSubmitter: Send + Sync {
    /// Stores the order and its lines, returning the new order's identifier.
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderId, CheckoutError>;
}

/// Submits the cart as an order and empties it once the submitter accepts.
///
/// # Errors
///
/// - [`CheckoutError::NotAuthenticated`]: `identity` is `None`.
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::TotalPrice`]: the cart total cannot be represented.
/// - Whatever the submitter returns; the cart is left as it was.
pub async fn place_order<P, S>(
    store: &mut CartStore<P>,
    identity: Option<&Identity>,
    submitter: &S,
) -> Result<PlacedOrder, CheckoutError>
where
    P: CartPersistence,
    S: CheckoutSubmitter + ?Sized,
{
    let customer = identity.ok_or(CheckoutError::NotAuthenticated)?;

    if store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = NewOrder::from_cart(store.cart(), customer)?;

    let id = submitter.submit_order(&order).await.inspect_err(|error| {
        tracing::warn!(customer = %customer.user_id, %error, "order submission failed");
    })?;

    store.empty_cart();

    tracing::info!(
        order = %id,
        customer = %customer.user_id,
        lines = order.items.len(),
        total = %order.total_price,
        "order placed"
    );

    Ok(PlacedOrder {
        id,
        total: order.total_price,
    })
}
