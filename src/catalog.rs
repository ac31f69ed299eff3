//! Catalog
//!
//! Product references enter the core here. Each product is read from a YAML
//! fixture, its prices parsed into minor units and validated before the cart
//! or wishlist can see it.

use std::{fs, io, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductError, ProductId};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product failed validation
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    /// Two catalog entries share a product id
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// The catalog has no products, so its currency is unknown
    #[error("No products in catalog; currency unknown")]
    NoProducts,
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of catalog key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Vendor or brand
    #[serde(default)]
    pub vendor: String,

    /// Image URI
    #[serde(default)]
    pub image: String,

    /// Product price (e.g., "2.99 GBP")
    pub price: String,

    /// Price before discount, defaults to the price
    #[serde(default)]
    pub original_price: Option<String>,

    /// Stock flag, defaults to in stock
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Average rating
    #[serde(default)]
    pub rating: f64,

    /// Review count
    #[serde(default)]
    pub reviews: u32,
}

fn default_in_stock() -> bool {
    true
}

impl ProductFixture {
    /// Parse prices and validate, returning the product and its currency.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a price is malformed, the two prices use
    /// different currencies, or the product fails validation.
    pub fn into_product(self) -> Result<(Product, &'static Currency), CatalogError> {
        let (price, currency) = parse_price(&self.price)?;

        let original_price = match &self.original_price {
            Some(original) => {
                let (minor_units, original_currency) = parse_price(original)?;

                if original_currency != currency {
                    return Err(CatalogError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        original_currency.iso_alpha_code.to_string(),
                    ));
                }

                minor_units
            }
            None => price,
        };

        let product = Product {
            id: self.id,
            name: self.name,
            price,
            original_price,
            vendor: self.vendor,
            image: self.image,
            in_stock: self.in_stock,
            rating: self.rating,
            reviews: self.reviews,
        };

        product.validate()?;

        Ok((product, currency))
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, if it has more decimal places than
/// the currency's minor unit, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?
        .normalize();

    // Finer than the currency's minor unit
    if amount.scale() > currency.exponent {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|factor| amount.checked_mul(Decimal::from(factor)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// A product listed in the catalog under a stable key.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Catalog key
    pub key: String,

    /// Validated product
    pub product: Product,
}

/// Validated products in a single currency, ordered by name.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    currency: &'static Currency,
}

impl Catalog {
    /// Read and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse and validate catalog YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed, any product is
    /// invalid, currencies differ, ids repeat or there are no products.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(fixture.products.len());
        let mut ids: FxHashSet<ProductId> = FxHashSet::default();
        let mut currency: Option<&'static Currency> = None;

        for (key, product_fixture) in fixture.products {
            let (product, product_currency) = product_fixture.into_product()?;

            if let Some(existing_currency) = currency
                && existing_currency != product_currency
            {
                return Err(CatalogError::CurrencyMismatch(
                    existing_currency.iso_alpha_code.to_string(),
                    product_currency.iso_alpha_code.to_string(),
                ));
            }

            currency = Some(product_currency);

            if !ids.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateId(product.id));
            }

            entries.push(CatalogEntry { key, product });
        }

        entries.sort_by(|left, right| {
            left.product
                .name
                .cmp(&right.product.name)
                .then_with(|| left.key.cmp(&right.key))
        });

        Ok(Self {
            entries,
            currency: currency.ok_or(CatalogError::NoProducts)?,
        })
    }

    /// Product listed under `key`.
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.product)
    }

    /// Product with the given id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.entries
            .iter()
            .find(|entry| entry.product.id == *id)
            .map(|entry| &entry.product)
    }

    /// Entries ordered by product name.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Currency shared by every product.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty. Always false for a loaded catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
