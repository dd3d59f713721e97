//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    calendar::ClockTime,
    catalog::ProductId,
    draft::PaymentMethod,
    i18n::Language,
    pricing::{DeliveryMethod, FeeWaiver},
    slots::{SlotId, TimeSlot, slot_label},
};

/// Order identifier, `ORD-` followed by eight uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let hex: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect();

        Self(format!("ORD-{}", hex.to_uppercase()))
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Where an order is in the ironing workflow. Operators may move between any two
/// statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FulfillmentStatus {
    /// Order placed
    #[default]
    Received,

    /// Garments picked up or dropped off
    Collected,

    /// Being ironed
    Ironing,

    /// Ironed and waiting
    Ready,

    /// On the way back
    Delivering,

    /// Returned to the customer
    Completed,
}

impl FulfillmentStatus {
    /// Every status, in workflow order.
    pub const ALL: [FulfillmentStatus; 6] = [
        FulfillmentStatus::Received,
        FulfillmentStatus::Collected,
        FulfillmentStatus::Ironing,
        FulfillmentStatus::Ready,
        FulfillmentStatus::Delivering,
        FulfillmentStatus::Completed,
    ];

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Collected => "collected",
            Self::Ironing => "ironing",
            Self::Ready => "ready",
            Self::Delivering => "delivering",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for FulfillmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown fulfillment status: {s}"))
    }
}

impl Display for FulfillmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Whether the customer has paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    /// Not yet paid
    #[default]
    Pending,

    /// Paid
    Paid,
}

/// Customer details as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    /// Full name
    pub name: String,

    /// Phone with separators removed
    pub phone: String,

    /// Address the operator visits
    pub address: String,

    /// Floor
    pub floor: String,

    /// Apartment
    pub apartment: String,

    /// Notes for the operator
    pub notes: String,

    /// Lives in the provider's building
    pub is_same_building: bool,
}

/// The booked slot, frozen at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    /// Slot id
    pub id: SlotId,

    /// Slot date
    pub date: Date,

    /// Start time
    pub start: ClockTime,

    /// End time
    pub end: ClockTime,
}

impl SlotSnapshot {
    /// Human readable label, as shown when booking.
    pub fn label(&self, language: Language) -> String {
        slot_label(self.date, self.start, self.end, language)
    }
}

impl From<&TimeSlot> for SlotSnapshot {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            id: slot.id().clone(),
            date: slot.date(),
            start: slot.start(),
            end: slot.end(),
        }
    }
}

/// A cart line frozen at order time, amounts in minor units. Later catalog edits do
/// not change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product id
    pub product_id: ProductId,

    /// Hebrew name
    pub name_he: String,

    /// French name
    pub name_fr: String,

    /// Unit price
    pub unit_price: i64,

    /// Quantity
    pub quantity: u32,

    /// Unit price times quantity
    pub line_total: i64,
}

impl OrderLine {
    /// Name in the given language.
    pub fn name(&self, language: Language) -> &str {
        language.pick(&self.name_he, &self.name_fr)
    }
}

/// An assembled order ready to be stored. Amounts are in minor units of `currency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Customer details
    pub customer: CustomerSnapshot,

    /// Delivery method
    pub delivery_method: DeliveryMethod,

    /// Delivery fee charged
    pub delivery_fee: i64,

    /// Why the fee was waived, if it was
    pub fee_waiver: Option<FeeWaiver>,

    /// Booked slot; absent for drop-off
    pub time_slot: Option<SlotSnapshot>,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Garments
    pub lines: Vec<OrderLine>,

    /// Sum of line totals
    pub items_subtotal: i64,

    /// Items plus delivery
    pub grand_total: i64,

    /// ISO currency code
    pub currency: String,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Order id
    pub id: OrderId,

    /// Order contents
    #[serde(flatten)]
    pub order: NewOrder,

    /// Fulfillment status
    pub status: FulfillmentStatus,

    /// Payment status
    pub payment_status: PaymentStatus,

    /// When the order was stored
    pub created_at: Timestamp,

    /// Last status or payment change
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Wrap a new order with a fresh id and initial statuses.
    pub fn new(order: NewOrder, now: Timestamp) -> Self {
        Self {
            id: OrderId::generate(),
            order,
            status: FulfillmentStatus::default(),
            payment_status: PaymentStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
