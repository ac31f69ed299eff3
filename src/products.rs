//! Products

use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::discount_percentage;

/// Product identifier.
///
/// Catalog ids are either numeric or free-form strings. The two are never
/// equal to each other: `1` and `"1"` identify different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id
    Number(u64),

    /// String id
    Text(String),
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(id) => write!(f, "{id}"),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for ProductId {
    type Err = Infallible;

    /// Digits parse as a numeric id, anything else as a string id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map_or_else(|_err| ProductId::Text(s.to_string()), ProductId::Number))
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

/// Errors raised when a product reference fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product has no display name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),

    /// The price is below zero.
    #[error("product {0} has a negative price: {1}")]
    NegativePrice(ProductId, i64),

    /// The original (pre-discount) price is lower than the selling price.
    #[error("product {id} has original price {original_price} below price {price}")]
    OriginalBelowPrice {
        /// Product id
        id: ProductId,
        /// Selling price in minor units
        price: i64,
        /// Original price in minor units
        original_price: i64,
    },

    /// The rating is NaN or infinite and cannot be stored as JSON.
    #[error("product {0} has a non-finite rating")]
    NonFiniteRating(ProductId),
}

/// A product reference as supplied by the catalog.
///
/// Prices are held in minor units (pence, cents); the currency belongs to the
/// catalog and the cart rather than to each product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Selling price in minor units
    pub price: i64,

    /// Price before discount in minor units
    pub original_price: i64,

    /// Vendor or brand
    #[serde(default)]
    pub vendor: String,

    /// Image URI
    #[serde(default)]
    pub image: String,

    /// Whether the product can currently be bought
    pub in_stock: bool,

    /// Average rating, display only
    #[serde(default)]
    pub rating: f64,

    /// Review count, display only
    #[serde(default)]
    pub reviews: u32,
}

impl Product {
    /// Create an in-stock product with no discount.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: price,
            vendor: String::new(),
            image: String::new(),
            in_stock: true,
            rating: 0.0,
            reviews: 0,
        }
    }

    /// Set the pre-discount price.
    #[must_use]
    pub fn with_original_price(mut self, original_price: i64) -> Self {
        self.original_price = original_price;
        self
    }

    /// Set the vendor.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Set the image URI.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the display rating and review count.
    #[must_use]
    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    /// Mark the product as out of stock.
    #[must_use]
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Check the fields the cart and wishlist rely on.
    ///
    /// # Errors
    ///
    /// - [`ProductError::EmptyName`]: the name is blank.
    /// - [`ProductError::NegativePrice`]: the price is below zero.
    /// - [`ProductError::OriginalBelowPrice`]: the original price is below the price.
    /// - [`ProductError::NonFiniteRating`]: the rating is NaN or infinite.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName(self.id.clone()));
        }

        if self.price < 0 {
            return Err(ProductError::NegativePrice(self.id.clone(), self.price));
        }

        if self.original_price < self.price {
            return Err(ProductError::OriginalBelowPrice {
                id: self.id.clone(),
                price: self.price,
                original_price: self.original_price,
            });
        }

        if !self.rating.is_finite() {
            return Err(ProductError::NonFiniteRating(self.id.clone()));
        }

        Ok(())
    }

    /// Selling price as money in the given currency.
    pub fn unit_price<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        Money::from_minor(self.price, currency)
    }

    /// Whole-percent discount relative to the original price.
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.original_price, self.price)
    }
}

/// Anything that is identified by a product id.
pub trait Identified {
    /// The product id this value refers to.
    fn product_id(&self) -> &ProductId;
}

impl Identified for Product {
    fn product_id(&self) -> &ProductId {
        &self.id
    }
}
