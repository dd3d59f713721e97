//! Configuration
//!
//! Service settings are loaded once at start-up from a single YAML document and
//! passed explicitly to every operation that needs them. Any problem in the document
//! is fatal: a [`Settings`] value only exists if the calendar, delivery rules and
//! catalog all validated.

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    calendar::{CalendarError, CalendarRules},
    catalog::{Catalog, CatalogError, Product},
    pricing::{DeliveryRules, DeliveryRulesError},
};

pub mod document;

use document::{SettingsDocument, parse_currency, parse_money};

const BUNDLED: &str = include_str!("../../config/service.yml");

/// Configuration Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the settings file
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// An amount is not in the configured currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Invalid opening hours
    #[error("Invalid calendar: {0}")]
    Calendar(#[from] CalendarError),

    /// Invalid delivery fees
    #[error("Invalid delivery rules: {0}")]
    DeliveryRules(#[from] DeliveryRulesError),

    /// Invalid catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The booking horizon must cover at least one day
    #[error("Horizon must be at least one day")]
    InvalidHorizon,
}

/// Provider contact details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Drop-off address, including floor and apartment
    pub address: String,

    /// Street address recorded for customers in the same building
    pub same_building_address: String,

    /// Number receiving hand-off messages
    pub whatsapp_number: Option<String>,
}

/// Validated service settings
#[derive(Debug, Clone)]
pub struct Settings<'a> {
    /// Weekly opening table
    pub calendar: CalendarRules,

    /// Delivery fees and free-delivery threshold
    pub delivery: DeliveryRules<'a>,

    /// Garment catalog
    pub catalog: Catalog<'a>,

    /// Provider details
    pub provider: ProviderInfo,

    /// Number of days offered for booking, at least one
    pub horizon_days: u32,
}

impl Settings<'static> {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold valid settings.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading settings");

        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, an amount uses another currency than
    /// the configured one, or the calendar, delivery rules or catalog are invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let document: SettingsDocument = serde_norway::from_str(yaml)?;
        let currency = parse_currency(&document.currency)?;

        if document.horizon_days == 0 {
            return Err(ConfigError::InvalidHorizon);
        }

        let amount = |raw: &str| {
            let money = parse_money(raw)?;

            expect_currency(money.currency(), currency)?;

            Ok::<_, ConfigError>(money)
        };

        let delivery = DeliveryRules::new(
            amount(&document.delivery.pickup_and_return)?,
            amount(&document.delivery.pickup_only)?,
            amount(&document.delivery.return_only)?,
            amount(&document.delivery.free_threshold)?,
        )?;

        let products = document
            .catalog
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::with_products(products, currency)?;
        let calendar = CalendarRules::try_from(document.calendar)?;

        debug!(
            currency = currency.iso_alpha_code,
            products = catalog.len(),
            horizon_days = document.horizon_days,
            "settings loaded"
        );

        Ok(Self {
            calendar,
            delivery,
            catalog,
            provider: ProviderInfo {
                address: document.provider.address,
                same_building_address: document.provider.same_building_address,
                whatsapp_number: document.provider.whatsapp_number,
            },
            horizon_days: document.horizon_days,
        })
    }

    /// Settings compiled into the binary from `config/service.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled document is invalid.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml(BUNDLED)
    }
}

impl<'a> Settings<'a> {
    /// Currency shared by every amount.
    pub fn currency(&self) -> &'a Currency {
        self.catalog.currency()
    }
}

fn expect_currency(found: &Currency, expected: &Currency) -> Result<(), ConfigError> {
    if found == expected {
        return Ok(());
    }

    Err(ConfigError::CurrencyMismatch(
        expected.iso_alpha_code.to_string(),
        found.iso_alpha_code.to_string(),
    ))
}
