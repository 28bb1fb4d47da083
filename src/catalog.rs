//! Catalog
//!
//! Local product catalog read from YAML. The storefront CLI uses it in place
//! of the remote catalog service.

use std::{collections::HashMap, fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    pricing::currency_from_code,
    products::{Product, ProductColor, ProductId, ProductImage},
};

/// Catalog Parsing Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price for product {0}: {1}")]
    InvalidPrice(ProductId, String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two products share an identifier
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Wrapper for the catalog document
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    currency: String,
    products: Vec<ProductFixture>,
}

/// Product entry in YAML
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: u64,
    title: String,
    #[serde(default)]
    description: String,
    /// Decimal amount, e.g. `"1299.00"`
    price: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    colors: Vec<ProductColor>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let id = ProductId::new(fixture.id);

        let unit_price = fixture
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| CatalogError::InvalidPrice(id, fixture.price.clone()))?;

        if unit_price.is_sign_negative() {
            return Err(CatalogError::InvalidPrice(id, fixture.price));
        }

        Ok(Product {
            id,
            title: fixture.title,
            description: fixture.description,
            unit_price,
            images: fixture
                .images
                .into_iter()
                .map(|url| ProductImage { url })
                .collect(),
            colors: fixture.colors,
        })
    }
}

/// Products available to the storefront, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parses a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for malformed YAML, unknown currencies,
    /// unparsable prices or repeated product ids.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let currency = currency_from_code(&fixture.currency)
            .ok_or_else(|| CatalogError::UnknownCurrency(fixture.currency.clone()))?;

        let mut products = Vec::with_capacity(fixture.products.len());
        let mut index = HashMap::with_capacity(fixture.products.len());

        for entry in fixture.products {
            let product = Product::try_from(entry)?;

            if index.insert(product.id, products.len()).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }

            products.push(product);
        }

        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// Looks up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&idx| self.products.get(idx))
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency prices are quoted in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
