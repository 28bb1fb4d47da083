//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wraps a raw catalog identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw catalog identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A colour a product is offered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    /// Display name, also used as the cart's colour variant label.
    pub name: String,

    /// Swatch colour, e.g. `#1e3a8a`.
    pub hex: String,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Public URL of the image.
    pub url: String,
}

/// Product record as supplied by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product description
    pub description: String,

    /// Current unit price
    pub unit_price: Decimal,

    /// Product images, in display order
    pub images: Vec<ProductImage>,

    /// Colour variants, in display order
    pub colors: Vec<ProductColor>,
}

impl Product {
    /// The colour pre-selected on the product page, if the product has any.
    pub fn default_color(&self) -> Option<&ProductColor> {
        self.colors.first()
    }

    /// The image shown for this product in lists and the cart.
    pub fn image_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Whether the product is offered in the named colour.
    pub fn has_color(&self, name: &str) -> bool {
        self.colors.iter().any(|color| color.name == name)
    }
}
