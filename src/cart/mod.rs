//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{self, TotalPriceError},
    products::{Product, ProductId},
};

pub mod store;

pub use store::CartStore;

/// Identity of a cart line: one line per product and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    /// Catalog product
    pub product_id: ProductId,

    /// Colour variant label
    pub color: &'a str,
}

impl<'a> LineKey<'a> {
    /// Creates a key for the given product and colour.
    pub fn new(product_id: ProductId, color: &'a str) -> Self {
        Self { product_id, color }
    }
}

/// A product/colour combination in the cart and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Catalog product this line refers to
    pub product_id: ProductId,

    /// Colour variant selected when the line was added
    pub color: String,

    /// Number of units, never below one
    pub quantity: u32,

    /// Product title at add time
    pub title: String,

    /// Unit price at add time
    pub unit_price: Decimal,

    /// Product image at add time
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLineItem {
    /// Builds a new line from the product's current display fields.
    pub fn from_product(product: &Product, quantity: u32, color: impl Into<String>) -> Self {
        Self {
            product_id: product.id,
            color: color.into(),
            quantity: quantity.max(1),
            title: product.title.clone(),
            unit_price: product.unit_price,
            image_url: product.image_url().map(str::to_string),
        }
    }

    /// The key identifying this line.
    pub fn key(&self) -> LineKey<'_> {
        LineKey::new(self.product_id, &self.color)
    }

    /// Whether this line is identified by `key`.
    pub fn matches(&self, key: LineKey<'_>) -> bool {
        self.product_id == key.product_id && self.color == key.color
    }

    /// `unit_price × quantity`
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total does not fit in a [`Decimal`].
    pub fn line_total(&self) -> Result<Decimal, TotalPriceError> {
        pricing::line_total(self)
    }
}

/// Ordered cart contents.
///
/// Serialises as a flat list of line records. Deserialising folds duplicate
/// keys and raises zero quantities to one, as [`FromIterator`] does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Looks up the line for `key`.
    pub fn get(&self, key: LineKey<'_>) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total does not fit in a [`Decimal`].
    pub fn total(&self) -> Result<Decimal, TotalPriceError> {
        pricing::cart_total(&self.items)
    }

    fn get_mut(&mut self, key: LineKey<'_>) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.matches(key))
    }

    /// Merges `quantity` into the line for the product and colour, appending
    /// a new line when there is none.
    pub(crate) fn add(&mut self, product: &Product, quantity: u32, color: &str) {
        if let Some(existing) = self.get_mut(LineKey::new(product.id, color)) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        self.items
            .push(CartLineItem::from_product(product, quantity, color));
    }

    /// Removes the line for `key`, returning whether one was removed.
    pub(crate) fn remove(&mut self, key: LineKey<'_>) -> bool {
        let before = self.items.len();

        self.items.retain(|item| !item.matches(key));

        self.items.len() != before
    }

    /// Sets the quantity of the line for `key`, clamped to at least one.
    /// Returns whether a line was found.
    pub(crate) fn set_quantity(&mut self, key: LineKey<'_>, quantity: u32) -> bool {
        match self.get_mut(key) {
            Some(item) => {
                item.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<CartLineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        let mut cart = Cart::new();

        // Restored data may contain duplicate keys; fold them to keep one line per key.
        for line in iter {
            match cart.get_mut(line.key()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.items.push(line),
            }
        }

        for item in &mut cart.items {
            item.quantity = item.quantity.max(1);
        }

        cart
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::products::{ProductColor, ProductImage};

    use super::*;

    fn product(id: u64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            unit_price: price,
            images: vec![ProductImage {
                url: format!("https://cdn.example/{id}.jpg"),
            }],
            colors: vec![ProductColor {
                name: "Red".to_string(),
                hex: "#ff0000".to_string(),
            }],
        }
    }

    #[test]
    fn line_copies_display_fields() {
        let product = product(1, Decimal::new(12_50, 2));

        let line = CartLineItem::from_product(&product, 2, "Red");

        assert_eq!(line.product_id, ProductId::new(1));
        assert_eq!(line.title, "Product 1");
        assert_eq!(line.unit_price, Decimal::new(12_50, 2));
        assert_eq!(line.image_url.as_deref(), Some("https://cdn.example/1.jpg"));
        assert_eq!(line.line_total(), Ok(Decimal::new(25_00, 2)));
    }

    #[test]
    fn add_merges_same_key() {
        let product = product(1, Decimal::ONE);
        let mut cart = Cart::new();

        cart.add(&product, 1, "Red");
        cart.add(&product, 4, "Red");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn remove_reports_whether_line_existed() {
        let product = product(1, Decimal::ONE);
        let mut cart = Cart::new();
        cart.add(&product, 1, "Red");

        assert!(!cart.remove(LineKey::new(product.id, "Blue")));
        assert!(cart.remove(LineKey::new(product.id, "Red")));
        assert!(cart.is_empty());
    }

    #[test]
    fn collecting_folds_duplicate_keys() {
        let a = product(1, Decimal::ONE);
        let b = product(2, Decimal::TWO);

        let cart: Cart = [
            CartLineItem::from_product(&a, 1, "Red"),
            CartLineItem::from_product(&b, 2, "Red"),
            CartLineItem::from_product(&a, 3, "Red"),
        ]
        .into_iter()
        .collect();

        assert_eq!(cart.len(), 2);
        assert_eq!(
            cart.get(LineKey::new(a.id, "Red")).map(|line| line.quantity),
            Some(4)
        );
        assert_eq!(
            cart.items().first().map(|line| line.product_id),
            Some(ProductId::new(1))
        );
    }

    #[test]
    fn deserialising_folds_duplicates_and_clamps_quantities() -> testresult::TestResult {
        let json = r#"[
            {"product_id":1,"color":"Red","quantity":0,"title":"Mug","unit_price":"5.00"},
            {"product_id":2,"color":"Blue","quantity":0,"title":"Cup","unit_price":"3.00"},
            {"product_id":1,"color":"Red","quantity":3,"title":"Mug","unit_price":"5.00"}
        ]"#;

        let cart: Cart = serde_json::from_str(json)?;

        assert_eq!(cart.len(), 2);
        assert_eq!(
            cart.get(LineKey::new(ProductId::new(1), "Red")).map(|line| line.quantity),
            Some(3)
        );
        assert_eq!(
            cart.get(LineKey::new(ProductId::new(2), "Blue")).map(|line| line.quantity),
            Some(1)
        );

        Ok(())
    }

    #[test]
    fn serialises_as_flat_list() -> testresult::TestResult {
        let mut cart = Cart::new();
        cart.add(&product(3, Decimal::new(100_00, 2)), 2, "Red");

        let json = serde_json::to_value(&cart)?;

        assert!(json.is_array(), "cart should serialise as an array: {json}");
        assert_eq!(json.as_array().map(Vec::len), Some(1));

        Ok(())
    }
}
