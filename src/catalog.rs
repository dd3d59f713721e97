//! Catalog

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;

/// Errors related to the product catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with this id.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// Two products share an id.
    #[error("Product {0} is listed more than once")]
    Duplicate(ProductId),

    /// A product is priced in another currency than the catalog (id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// A product has a negative price.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// An update changed nothing.
    #[error("No updates provided")]
    NoUpdates,
}

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A garment type that can be ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Hebrew name
    pub name_he: String,

    /// French name
    pub name_fr: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Whether the product is offered
    pub active: bool,
}

impl Product<'_> {
    /// Name in the given language.
    pub fn name(&self, language: Language) -> &str {
        language.pick(&self.name_he, &self.name_fr)
    }
}

/// Operator edit of a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate<'a> {
    /// New unit price
    pub price: Option<Money<'a, Currency>>,

    /// New Hebrew name
    pub name_he: Option<String>,

    /// New French name
    pub name_fr: Option<String>,
}

impl ProductUpdate<'_> {
    fn is_empty(&self) -> bool {
        self.price.is_none() && self.name_he.is_none() && self.name_fr.is_none()
    }
}

/// Products in display order, all in one currency.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Create a catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Duplicate`]: two products share an id.
    /// - [`CatalogError::CurrencyMismatch`]: a product is priced in another currency.
    /// - [`CatalogError::NegativePrice`]: a product has a negative price.
    pub fn with_products(
        products: impl Into<Vec<Product<'a>>>,
        currency: &'a Currency,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut seen = FxHashSet::default();

        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::Duplicate(product.id));
            }

            check_price(product.id, &product.price, currency)?;
        }

        Ok(Self { products, currency })
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id.
    pub fn get(&self, id: ProductId) -> Result<&Product<'a>, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Products currently offered, in display order.
    pub fn active(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter().filter(|product| product.active)
    }

    /// Apply an operator update and return the updated product.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NoUpdates`]: the update is empty.
    /// - [`CatalogError::NotFound`]: no product has this id.
    /// - [`CatalogError::CurrencyMismatch`] or [`CatalogError::NegativePrice`]: the new price is invalid.
    pub fn update(
        &mut self,
        id: ProductId,
        update: ProductUpdate<'a>,
    ) -> Result<&Product<'a>, CatalogError> {
        if update.is_empty() {
            return Err(CatalogError::NoUpdates);
        }

        if let Some(price) = &update.price {
            check_price(id, price, self.currency)?;
        }

        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(price) = update.price {
            product.price = price;
        }

        if let Some(name_he) = update.name_he {
            product.name_he = name_he;
        }

        if let Some(name_fr) = update.name_fr {
            product.name_fr = name_fr;
        }

        Ok(product)
    }

    /// Number of products, active or not.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

fn check_price(
    id: ProductId,
    price: &Money<'_, Currency>,
    currency: &Currency,
) -> Result<(), CatalogError> {
    if price.currency() != currency {
        return Err(CatalogError::CurrencyMismatch(
            id,
            price.currency().iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    if price.to_minor_units() < 0 {
        return Err(CatalogError::NegativePrice(id));
    }

    Ok(())
}
