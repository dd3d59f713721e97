//! Order Draft
//!
//! The checkout in progress. Totals are derived on every call rather than stored,
//! so they always reflect the current cart, delivery method and same-building flag.

use std::str::FromStr;

use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    customer::CustomerProfile,
    pricing::{
        DeliveryMethod, DeliveryQuote, DeliveryRules, OrderTotals, amount_for_free_delivery, price,
    },
    slots::{SlotId, TimeSlot},
};

/// Errors raised while pricing a draft.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Error calculating the cart subtotal.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How the customer intends to pay. Only recorded; no payment is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    Cash,

    /// Bit mobile transfer
    Bit,
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cash" => Ok(Self::Cash),
            "bit" => Ok(Self::Bit),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Cart, customer and delivery choices awaiting submission.
#[derive(Debug, Clone)]
pub struct OrderDraft<'a> {
    /// Garments to iron
    pub cart: Cart<'a>,

    /// Customer details
    pub customer: CustomerProfile,

    delivery_method: DeliveryMethod,
    payment_method: PaymentMethod,
    time_slot: Option<SlotId>,
}

impl<'a> OrderDraft<'a> {
    /// Start a draft with an empty cart.
    pub fn new(currency: &'a Currency) -> Self {
        Self::with_customer(currency, CustomerProfile::default())
    }

    /// Start a draft for a returning customer.
    pub fn with_customer(currency: &'a Currency, customer: CustomerProfile) -> Self {
        Self {
            cart: Cart::new(currency),
            customer,
            delivery_method: DeliveryMethod::default(),
            payment_method: PaymentMethod::default(),
            time_slot: None,
        }
    }

    /// Selected delivery method
    pub fn delivery_method(&self) -> DeliveryMethod {
        self.delivery_method
    }

    /// Change the delivery method.
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) {
        self.delivery_method = method;
    }

    /// Selected payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Change the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Id of the selected slot, which may since have expired.
    pub fn time_slot(&self) -> Option<&SlotId> {
        self.time_slot.as_ref()
    }

    /// Select an offered slot. The draft keeps only its id.
    pub fn select_slot(&mut self, slot: &TimeSlot) {
        self.time_slot = Some(slot.id().clone());
    }

    /// Select a slot by id.
    pub fn select_slot_id(&mut self, id: SlotId) {
        self.time_slot = Some(id);
    }

    /// Drop the slot selection.
    pub fn clear_slot(&mut self) {
        self.time_slot = None;
    }

    /// Price delivery for the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError::Cart`] if the cart subtotal cannot be calculated.
    pub fn quote(&self, rules: &DeliveryRules<'a>) -> Result<DeliveryQuote<'a>, DraftError> {
        let subtotal = self.cart.subtotal()?;

        Ok(price(
            &subtotal,
            self.delivery_method,
            self.customer.is_same_building,
            rules,
        ))
    }

    /// Item, delivery and grand totals for the current cart.
    ///
    /// # Errors
    ///
    /// - [`DraftError::Cart`]: the cart subtotal cannot be calculated.
    /// - [`DraftError::Money`]: the cart and delivery rules use different currencies.
    pub fn totals(&self, rules: &DeliveryRules<'a>) -> Result<OrderTotals<'a>, DraftError> {
        let subtotal = self.cart.subtotal()?;
        let quote = self.quote(rules)?;

        Ok(OrderTotals::new(subtotal, &quote)?)
    }

    /// Amount still needed for free delivery.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError::Cart`] if the cart subtotal cannot be calculated.
    pub fn amount_for_free_delivery(
        &self,
        rules: &DeliveryRules<'a>,
    ) -> Result<Money<'a, Currency>, DraftError> {
        let subtotal = self.cart.subtotal()?;

        Ok(amount_for_free_delivery(
            &subtotal,
            self.delivery_method,
            self.customer.is_same_building,
            rules,
        ))
    }

    /// Reset after submission or cancellation. The customer profile is kept.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.delivery_method = DeliveryMethod::default();
        self.payment_method = PaymentMethod::default();
        self.time_slot = None;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::ILS;
    use testresult::TestResult;

    use crate::{
        catalog::ProductId,
        pricing::FeeWaiver,
        test_support::{delivery_rules, garment, shekels},
    };

    use super::*;

    fn draft_with_shirts(count: u32) -> Result<OrderDraft<'static>, CartError> {
        let mut draft = OrderDraft::new(ILS);

        draft.cart.add(&garment(2, "Chemise", 15))?;
        draft.cart.set_quantity(ProductId(2), count)?;

        Ok(draft)
    }

    #[test]
    fn new_draft_uses_defaults() {
        let draft = OrderDraft::new(ILS);

        assert_eq!(draft.delivery_method(), DeliveryMethod::PickupAndReturn);
        assert_eq!(draft.payment_method(), PaymentMethod::Cash);
        assert!(draft.time_slot().is_none());
        assert!(draft.cart.is_empty());
    }

    #[test]
    fn totals_follow_every_change() -> TestResult {
        let rules = delivery_rules()?;
        let mut draft = draft_with_shirts(2)?;

        assert_eq!(draft.totals(&rules)?.grand, shekels(45));

        draft.set_delivery_method(DeliveryMethod::PickupOnly);
        assert_eq!(draft.totals(&rules)?.grand, shekels(40));

        draft.customer.is_same_building = true;
        assert_eq!(draft.totals(&rules)?.grand, shekels(30));

        draft.customer.is_same_building = false;
        draft.cart.set_quantity(ProductId(2), 7)?;

        let totals = draft.totals(&rules)?;
        assert_eq!(totals.items, shekels(105));
        assert_eq!(totals.delivery, shekels(0));
        assert_eq!(draft.quote(&rules)?.waiver, Some(FeeWaiver::FreeThreshold));

        Ok(())
    }

    #[test]
    fn amount_for_free_delivery_tracks_cart() -> TestResult {
        let rules = delivery_rules()?;
        let mut draft = draft_with_shirts(4)?;

        assert_eq!(draft.amount_for_free_delivery(&rules)?, shekels(40));

        draft.set_delivery_method(DeliveryMethod::DropOff);
        assert_eq!(draft.amount_for_free_delivery(&rules)?, shekels(0));

        Ok(())
    }

    #[test]
    fn clear_keeps_customer() -> TestResult {
        let mut draft = draft_with_shirts(1)?;

        draft.customer.name = "Dana".to_string();
        draft.set_delivery_method(DeliveryMethod::ReturnOnly);
        draft.set_payment_method(PaymentMethod::Bit);
        draft.select_slot_id(SlotId::from("2026-10-19_20:30"));

        draft.clear();

        assert!(draft.cart.is_empty());
        assert_eq!(draft.delivery_method(), DeliveryMethod::PickupAndReturn);
        assert_eq!(draft.payment_method(), PaymentMethod::Cash);
        assert!(draft.time_slot().is_none());
        assert_eq!(draft.customer.name, "Dana");

        Ok(())
    }

    #[test]
    fn parses_payment_methods() {
        assert_eq!("bit".parse::<PaymentMethod>(), Ok(PaymentMethod::Bit));
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
