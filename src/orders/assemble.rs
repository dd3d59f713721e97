//! Order Assembly
//!
//! Turns a validated draft into a [`NewOrder`]: slots are regenerated at `now` so a
//! selection that has since passed its cutoff is refused, prices are snapshotted from
//! the cart, and totals are recomputed from the delivery rules.

use jiff::civil::DateTime;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::CartError,
    config::Settings,
    draft::{DraftError, OrderDraft},
    orders::models::{CustomerSnapshot, NewOrder, OrderLine, SlotSnapshot},
    slots::{find_slot, generate},
    validation::{ValidationErrors, validate},
};

/// Reasons a draft cannot become an order.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The draft failed validation.
    #[error("Draft has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),

    /// There is nothing to iron.
    #[error("Cart is empty")]
    EmptyCart,

    /// Totals could not be computed.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// A line total could not be computed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Assemble the order payload for a draft.
///
/// # Errors
///
/// - [`AssembleError::Invalid`]: the draft has field errors against the slots offered at `now`.
/// - [`AssembleError::EmptyCart`]: the cart has no lines.
/// - [`AssembleError::Draft`] or [`AssembleError::Cart`]: amounts could not be computed.
pub fn assemble(
    draft: &OrderDraft<'_>,
    settings: &Settings<'_>,
    now: DateTime,
) -> Result<NewOrder, AssembleError> {
    let offered = generate(&settings.calendar, settings.horizon_days, now);
    let errors = validate(draft, &offered);

    if !errors.is_empty() {
        debug!(?errors, "draft rejected");

        return Err(AssembleError::Invalid(errors));
    }

    if draft.cart.is_empty() {
        return Err(AssembleError::EmptyCart);
    }

    let quote = draft.quote(&settings.delivery)?;
    let totals = draft.totals(&settings.delivery)?;

    let time_slot = if draft.delivery_method().requires_visit() {
        draft
            .time_slot()
            .and_then(|id| find_slot(&offered, id))
            .map(SlotSnapshot::from)
    } else {
        None
    };

    let lines = draft
        .cart
        .iter()
        .map(|line| -> Result<OrderLine, CartError> {
            Ok(OrderLine {
                product_id: line.product(),
                name_he: line.name_he().to_string(),
                name_fr: line.name_fr().to_string(),
                unit_price: line.unit_price().to_minor_units(),
                quantity: line.quantity().get(),
                line_total: line.total()?.to_minor_units(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let customer = &draft.customer;

    let address = if customer.is_same_building {
        settings.provider.same_building_address.clone()
    } else {
        customer.address.trim().to_string()
    };

    let order = NewOrder {
        customer: CustomerSnapshot {
            name: customer.name.trim().to_string(),
            phone: customer.normalized_phone(),
            address,
            floor: customer.floor.trim().to_string(),
            apartment: customer.apartment.trim().to_string(),
            notes: customer.notes.trim().to_string(),
            is_same_building: customer.is_same_building,
        },
        delivery_method: draft.delivery_method(),
        delivery_fee: quote.fee.to_minor_units(),
        fee_waiver: quote.waiver,
        time_slot,
        payment_method: draft.payment_method(),
        lines,
        items_subtotal: totals.items.to_minor_units(),
        grand_total: totals.grand.to_minor_units(),
        currency: draft.cart.currency().iso_alpha_code.to_string(),
    };

    debug!(
        method = ?order.delivery_method,
        lines = order.lines.len(),
        grand_total = order.grand_total,
        "order assembled"
    );

    Ok(order)
}
