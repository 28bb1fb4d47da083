//! Cart Store

use rust_decimal::Decimal;

use crate::{
    cart::{Cart, CartLineItem, LineKey},
    persistence::CartPersistence,
    pricing::TotalPriceError,
    products::{Product, ProductId},
};

/// Owns the cart for a session and persists it after every mutation.
///
/// There is a single writer: every mutation takes `&mut self`, completes
/// synchronously and cannot fail. Persistence problems are logged by the
/// adapter and never reach the caller.
#[derive(Debug)]
pub struct CartStore<P> {
    cart: Cart,
    persistence: P,
}

impl<P: CartPersistence> CartStore<P> {
    /// Opens a store, restoring whatever the adapter has saved.
    pub fn open(persistence: P) -> Self {
        let cart = persistence.load();

        tracing::debug!(lines = cart.len(), "opened cart store");

        Self { cart, persistence }
    }

    /// Adds `quantity` units of `product` in `color`.
    ///
    /// An existing line for the same product and colour has the quantity added
    /// to it; otherwise a new line is appended with the product's current
    /// title, price and image.
    pub fn add_item(&mut self, product: &Product, quantity: u32, color: &str) {
        self.cart.add(product, quantity, color);

        tracing::debug!(product = %product.id, color, quantity, "added to cart");

        self.persist();
    }

    /// Removes the line for `product_id` in `color`. Unknown lines are ignored.
    pub fn remove_item(&mut self, product_id: ProductId, color: &str) {
        if self.cart.remove(LineKey::new(product_id, color)) {
            tracing::debug!(product = %product_id, color, "removed from cart");

            self.persist();
        }
    }

    /// Sets the quantity of the line for `product_id` in `color`.
    ///
    /// Quantities below one are raised to one; use [`Self::remove_item`] to
    /// drop a line. Unknown lines are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, color: &str, quantity: u32) {
        if self
            .cart
            .set_quantity(LineKey::new(product_id, color), quantity)
        {
            tracing::debug!(product = %product_id, color, quantity, "updated cart quantity");

            self.persist();
        }
    }

    /// Removes every line.
    pub fn empty_cart(&mut self) {
        self.cart.clear();

        tracing::debug!("emptied cart");

        self.persist();
    }

    fn persist(&mut self) {
        self.persistence.save(&self.cart);
    }
}

impl<P> CartStore<P> {
    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Looks up a single line.
    pub fn get(&self, product_id: ProductId, color: &str) -> Option<&CartLineItem> {
        self.cart.get(LineKey::new(product_id, color))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total number of units, as shown on a cart badge.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of all line totals, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total does not fit in a [`Decimal`].
    pub fn total(&self) -> Result<Decimal, TotalPriceError> {
        self.cart.total()
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Tears the store down, returning the persistence adapter.
    pub fn into_persistence(self) -> P {
        self.persistence
    }
}
