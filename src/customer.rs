//! Customer

use serde::{Deserialize, Serialize};

/// Contact and access details supplied by the customer.
///
/// Address, floor and apartment only matter when the operator visits; with
/// `is_same_building` set the address is the provider's own building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerProfile {
    /// Full name
    pub name: String,

    /// Phone number as typed
    pub phone: String,

    /// Street address
    pub address: String,

    /// Floor
    pub floor: String,

    /// Apartment number
    pub apartment: String,

    /// Free-text notes for the operator
    pub notes: String,

    /// Lives in the provider's building
    pub is_same_building: bool,
}

impl CustomerProfile {
    /// Phone number with separators removed.
    pub fn normalized_phone(&self) -> String {
        normalize_phone(&self.phone)
    }
}

/// Strip dashes and whitespace from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// Whether a phone number matches the local pattern: a leading `0` and 9 or 10
/// digits once separators are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = normalize_phone(phone);

    digits.starts_with('0')
        && (9..=10).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
}
