//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{Product, ProductId},
    i18n::Language,
};

/// Errors related to cart contents or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    LineNotFound(ProductId),

    /// A line total or the subtotal does not fit in minor units.
    #[error("Cart total overflowed")]
    Overflow,
}

/// One product in the cart, priced at the time it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: ProductId,
    name_he: String,
    name_fr: String,
    unit_price: Money<'a, Currency>,
    quantity: NonZeroU32,
}

impl<'a> CartLine<'a> {
    fn from_product(product: &Product<'a>) -> Self {
        Self {
            product: product.id,
            name_he: product.name_he.clone(),
            name_fr: product.name_fr.clone(),
            unit_price: product.price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Product id
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Hebrew name
    pub fn name_he(&self) -> &str {
        &self.name_he
    }

    /// French name
    pub fn name_fr(&self) -> &str {
        &self.name_fr
    }

    /// Name in the given language.
    pub fn name(&self, language: Language) -> &str {
        language.pick(&self.name_he, &self.name_fr)
    }

    /// Unit price
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity.get()))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product, opening a line if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add(&mut self, product: &Product<'a>) -> Result<(), CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        match self.line_mut(product.id) {
            Ok(line) => line.quantity = line.quantity.saturating_add(1),
            Err(_) => self.lines.push(CartLine::from_product(product)),
        }

        Ok(())
    }

    /// Remove a product's line entirely. Removing an absent product is a no-op.
    pub fn remove(&mut self, product: ProductId) {
        self.lines.retain(|line| line.product != product);
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product has no line.
    pub fn set_quantity(&mut self, product: ProductId, quantity: u32) -> Result<(), CartError> {
        match NonZeroU32::new(quantity) {
            Some(quantity) => self.line_mut(product)?.quantity = quantity,
            None => {
                self.line_mut(product)?;
                self.remove(product);
            }
        }

        Ok(())
    }

    /// Add one to a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product has no line.
    pub fn increment(&mut self, product: ProductId) -> Result<(), CartError> {
        let line = self.line_mut(product)?;
        line.quantity = line.quantity.saturating_add(1);

        Ok(())
    }

    /// Take one from a line's quantity, removing the line when it would reach zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product has no line.
    pub fn decrement(&mut self, product: ProductId) -> Result<(), CartError> {
        let quantity = self.line_mut(product)?.quantity.get();

        self.set_quantity(product, quantity - 1)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor = self.lines.iter().try_fold(0_i64, |acc, line| {
            acc.checked_add(line.total()?.to_minor_units())
                .ok_or(CartError::Overflow)
        })?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Total number of garments across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Get a product's line.
    pub fn line(&self, product: ProductId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product == product)
    }

    /// Iterate over the lines in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    fn line_mut(&mut self, product: ProductId) -> Result<&mut CartLine<'a>, CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.product == product)
            .ok_or(CartError::LineNotFound(product))
    }
}
