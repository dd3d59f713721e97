//! Configuration Document
//!
//! Raw shape of the YAML settings file before it is validated into domain types.

use jiff::civil::Weekday;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, ILS, USD},
};
use serde::Deserialize;

use crate::{
    calendar::{CalendarRules, ClockTime, DaySchedule, OpenInterval},
    catalog::{Product, ProductId},
    config::ConfigError,
};

/// Top-level settings document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    /// ISO code every amount must use (e.g. `ILS`)
    pub currency: String,

    /// Number of days offered for booking
    pub horizon_days: u32,

    /// Provider details
    pub provider: ProviderDocument,

    /// Delivery fees and free-delivery threshold
    pub delivery: DeliveryDocument,

    /// Weekly opening table
    pub calendar: CalendarDocument,

    /// Garment catalog, in display order
    pub catalog: Vec<ProductDocument>,
}

/// Provider details
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDocument {
    /// Drop-off address, including floor and apartment
    pub address: String,

    /// Street address used for customers living in the same building
    pub same_building_address: String,

    /// Number receiving hand-off messages, digits only
    #[serde(default)]
    pub whatsapp_number: Option<String>,
}

/// Delivery amounts, each written as `"AMOUNT CODE"`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDocument {
    /// Fee when the operator collects and returns
    pub pickup_and_return: String,

    /// Fee when the operator only collects
    pub pickup_only: String,

    /// Fee when the operator only returns
    pub return_only: String,

    /// Subtotal from which delivery is free
    pub free_threshold: String,
}

/// Per-weekday schedules. Every weekday must be listed, as `closed` or as intervals.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarDocument {
    /// Sunday
    pub sunday: DayDocument,
    /// Monday
    pub monday: DayDocument,
    /// Tuesday
    pub tuesday: DayDocument,
    /// Wednesday
    pub wednesday: DayDocument,
    /// Thursday
    pub thursday: DayDocument,
    /// Friday
    pub friday: DayDocument,
    /// Saturday
    pub saturday: DayDocument,
}

/// The literal word `closed`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosedMarker {
    /// closed
    Closed,
}

/// One weekday: `closed` or a list of intervals.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DayDocument {
    /// No service
    Closed(ClosedMarker),

    /// Opening windows
    Open(Vec<IntervalDocument>),
}

/// Opening window, times as `HH:MM`
#[derive(Debug, Deserialize)]
pub struct IntervalDocument {
    /// Opening time
    pub start: String,

    /// Closing time
    pub end: String,
}

/// Catalog entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    /// Product id
    pub id: u32,

    /// Hebrew name
    pub name_he: String,

    /// French name
    pub name_fr: String,

    /// Unit price (e.g. `"15 ILS"`)
    pub price: String,

    /// Whether the product is offered
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl DayDocument {
    fn into_schedule(self, weekday: Weekday) -> Result<DaySchedule, ConfigError> {
        match self {
            Self::Closed(_) => Ok(DaySchedule::Closed),
            Self::Open(intervals) => {
                let intervals = intervals
                    .into_iter()
                    .map(|interval| -> Result<OpenInterval, ConfigError> {
                        Ok(OpenInterval::new(
                            interval.start.parse::<ClockTime>()?,
                            interval.end.parse::<ClockTime>()?,
                        ))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(DaySchedule::open(weekday, intervals)?)
            }
        }
    }
}

impl TryFrom<CalendarDocument> for CalendarRules {
    type Error = ConfigError;

    fn try_from(document: CalendarDocument) -> Result<Self, Self::Error> {
        Ok(CalendarRules::new([
            document.sunday.into_schedule(Weekday::Sunday)?,
            document.monday.into_schedule(Weekday::Monday)?,
            document.tuesday.into_schedule(Weekday::Tuesday)?,
            document.wednesday.into_schedule(Weekday::Wednesday)?,
            document.thursday.into_schedule(Weekday::Thursday)?,
            document.friday.into_schedule(Weekday::Friday)?,
            document.saturday.into_schedule(Weekday::Saturday)?,
        ]))
    }
}

impl TryFrom<ProductDocument> for Product<'_> {
    type Error = ConfigError;

    fn try_from(document: ProductDocument) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(document.id),
            name_he: document.name_he,
            name_fr: document.name_fr,
            price: parse_money(&document.price)?,
            active: document.active,
        })
    }
}

/// Look up a supported ISO currency code.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for any other code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim() {
        "ILS" => Ok(ILS),
        "EUR" => Ok(EUR),
        "USD" => Ok(USD),
        "GBP" => Ok(GBP),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "12.50 ILS") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), ConfigError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(ConfigError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| ConfigError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| ConfigError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(code)?))
}

/// Parse a price string straight into [`Money`].
///
/// # Errors
///
/// See [`parse_price`].
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, ConfigError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}
