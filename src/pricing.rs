//! Pricing
//!
//! Delivery fees are resolved by an ordered waiver table: the first waiver whose
//! condition holds zeroes the fee, otherwise the fee for the chosen delivery method
//! applies. The table order is the precedence, see [`FeeWaiver::PRECEDENCE`].

use std::str::FromStr;

use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How garments travel between customer and operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryMethod {
    /// Operator collects and returns
    #[default]
    PickupAndReturn,

    /// Operator collects, customer fetches
    PickupOnly,

    /// Customer drops off, operator returns
    ReturnOnly,

    /// Customer carries garments both ways
    DropOff,
}

impl DeliveryMethod {
    /// Whether the operator has to reach the customer's door.
    pub fn requires_visit(self) -> bool {
        !matches!(self, Self::DropOff)
    }
}

impl FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pickup-and-return" | "pickupAndReturn" => Ok(Self::PickupAndReturn),
            "pickup-only" | "pickupOnly" => Ok(Self::PickupOnly),
            "return-only" | "returnOnly" => Ok(Self::ReturnOnly),
            "drop-off" | "dropOff" => Ok(Self::DropOff),
            other => Err(format!("unknown delivery method: {other}")),
        }
    }
}

/// Errors raised when building [`DeliveryRules`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryRulesError {
    /// An amount was below zero (field name).
    #[error("{0} must not be negative")]
    Negative(&'static str),

    /// Amounts use different currencies (field name, expected, found).
    #[error("{0} is in {2}, expected {1}")]
    CurrencyMismatch(&'static str, &'static str, &'static str),
}

/// Delivery fee table and free-delivery threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRules<'a> {
    pickup_and_return_fee: Money<'a, Currency>,
    pickup_only_fee: Money<'a, Currency>,
    return_only_fee: Money<'a, Currency>,
    free_threshold: Money<'a, Currency>,
}

impl<'a> DeliveryRules<'a> {
    /// Create a rule set. All amounts must be non-negative and share a currency.
    ///
    /// # Errors
    ///
    /// - [`DeliveryRulesError::Negative`]: an amount is below zero.
    /// - [`DeliveryRulesError::CurrencyMismatch`]: amounts use more than one currency.
    pub fn new(
        pickup_and_return_fee: Money<'a, Currency>,
        pickup_only_fee: Money<'a, Currency>,
        return_only_fee: Money<'a, Currency>,
        free_threshold: Money<'a, Currency>,
    ) -> Result<Self, DeliveryRulesError> {
        let expected = pickup_and_return_fee.currency();

        [
            ("pickup_and_return_fee", &pickup_and_return_fee),
            ("pickup_only_fee", &pickup_only_fee),
            ("return_only_fee", &return_only_fee),
            ("free_threshold", &free_threshold),
        ]
        .into_iter()
        .try_for_each(|(field, amount)| {
            if amount.to_minor_units() < 0 {
                return Err(DeliveryRulesError::Negative(field));
            }

            if amount.currency() != expected {
                return Err(DeliveryRulesError::CurrencyMismatch(
                    field,
                    expected.iso_alpha_code,
                    amount.currency().iso_alpha_code,
                ));
            }

            Ok(())
        })?;

        Ok(Self {
            pickup_and_return_fee,
            pickup_only_fee,
            return_only_fee,
            free_threshold,
        })
    }

    /// Fee for the given method before any waiver; `None` for drop-off.
    pub fn fee_for(&self, method: DeliveryMethod) -> Option<Money<'a, Currency>> {
        match method {
            DeliveryMethod::PickupAndReturn => Some(self.pickup_and_return_fee),
            DeliveryMethod::PickupOnly => Some(self.pickup_only_fee),
            DeliveryMethod::ReturnOnly => Some(self.return_only_fee),
            DeliveryMethod::DropOff => None,
        }
    }

    /// Cart subtotal at which delivery becomes free.
    pub fn free_threshold(&self) -> Money<'a, Currency> {
        self.free_threshold
    }

    /// Currency of every amount in the rule set.
    pub fn currency(&self) -> &'a Currency {
        self.free_threshold.currency()
    }

    fn zero(&self) -> Money<'a, Currency> {
        Money::from_minor(0, self.currency())
    }
}

/// Reason a delivery fee was waived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeWaiver {
    /// No delivery service is rendered.
    DropOff,

    /// Customer lives in the operator's building.
    SameBuilding,

    /// Cart subtotal reached the free-delivery threshold.
    FreeThreshold,
}

impl FeeWaiver {
    /// Waivers in the order they are tried.
    pub const PRECEDENCE: [FeeWaiver; 3] = [
        FeeWaiver::DropOff,
        FeeWaiver::SameBuilding,
        FeeWaiver::FreeThreshold,
    ];
}

struct PricingInput {
    method: DeliveryMethod,
    is_same_building: bool,
    subtotal: i64,
    free_threshold: i64,
}

struct WaiverRule {
    waiver: FeeWaiver,
    applies: fn(&PricingInput) -> bool,
}

fn is_drop_off(input: &PricingInput) -> bool {
    input.method == DeliveryMethod::DropOff
}

fn is_same_building(input: &PricingInput) -> bool {
    input.is_same_building
}

fn meets_threshold(input: &PricingInput) -> bool {
    input.subtotal >= input.free_threshold
}

const WAIVER_RULES: [WaiverRule; 3] = [
    WaiverRule {
        waiver: FeeWaiver::DropOff,
        applies: is_drop_off,
    },
    WaiverRule {
        waiver: FeeWaiver::SameBuilding,
        applies: is_same_building,
    },
    WaiverRule {
        waiver: FeeWaiver::FreeThreshold,
        applies: meets_threshold,
    },
];

/// Resolved delivery fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryQuote<'a> {
    /// Fee charged for delivery
    pub fee: Money<'a, Currency>,

    /// Waiver that zeroed the fee, if any
    pub waiver: Option<FeeWaiver>,
}

impl DeliveryQuote<'_> {
    /// Check if delivery costs nothing.
    pub fn is_free(&self) -> bool {
        self.fee.to_minor_units() == 0
    }
}

/// Price delivery for a cart subtotal.
///
/// Pure and cheap; callers re-run it whenever the cart, the delivery method or the
/// same-building flag changes. `subtotal` must be in the rules' currency.
pub fn price<'a>(
    subtotal: &Money<'a, Currency>,
    method: DeliveryMethod,
    is_same_building: bool,
    rules: &DeliveryRules<'a>,
) -> DeliveryQuote<'a> {
    debug_assert_eq!(
        subtotal.currency(),
        rules.currency(),
        "subtotal and delivery rules use different currencies"
    );

    let input = PricingInput {
        method,
        is_same_building,
        subtotal: subtotal.to_minor_units(),
        free_threshold: rules.free_threshold.to_minor_units(),
    };

    let waiver = WAIVER_RULES
        .iter()
        .find(|rule| (rule.applies)(&input))
        .map(|rule| rule.waiver);

    let fee = match waiver {
        Some(_) => rules.zero(),
        None => rules.fee_for(method).unwrap_or_else(|| rules.zero()),
    };

    DeliveryQuote { fee, waiver }
}

/// How much more the cart needs before delivery becomes free.
///
/// Zero when a drop-off or same-building waiver already applies. `subtotal` must be
/// in the rules' currency.
pub fn amount_for_free_delivery<'a>(
    subtotal: &Money<'a, Currency>,
    method: DeliveryMethod,
    is_same_building: bool,
    rules: &DeliveryRules<'a>,
) -> Money<'a, Currency> {
    debug_assert_eq!(
        subtotal.currency(),
        rules.currency(),
        "subtotal and delivery rules use different currencies"
    );

    if !method.requires_visit() || is_same_building {
        return rules.zero();
    }

    let remaining = rules
        .free_threshold
        .to_minor_units()
        .saturating_sub(subtotal.to_minor_units())
        .max(0);

    Money::from_minor(remaining, rules.currency())
}

/// Item, delivery and grand totals for an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of cart lines
    pub items: Money<'a, Currency>,

    /// Delivery fee
    pub delivery: Money<'a, Currency>,

    /// Items plus delivery
    pub grand: Money<'a, Currency>,
}

impl<'a> OrderTotals<'a> {
    /// Combine a cart subtotal with a delivery quote.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtotal and fee currencies differ.
    pub fn new(
        subtotal: Money<'a, Currency>,
        quote: &DeliveryQuote<'a>,
    ) -> Result<Self, MoneyError> {
        Ok(Self {
            items: subtotal,
            delivery: quote.fee,
            grand: subtotal.add(quote.fee)?,
        })
    }
}
