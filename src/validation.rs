//! Validation
//!
//! Checks a draft against the submission checklist. Every rule runs on every call so
//! the caller gets all field errors at once; an empty [`ValidationErrors`] means the
//! draft can be submitted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    customer::is_valid_phone,
    draft::OrderDraft,
    slots::{TimeSlot, find_slot},
};

/// Draft fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    /// Customer name
    Name,

    /// Customer phone
    Phone,

    /// Street address
    Address,

    /// Floor
    Floor,

    /// Apartment
    Apartment,

    /// Pickup/return slot
    TimeSlot,
}

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldError {
    /// Missing or blank
    Required,

    /// Not a local phone number
    InvalidPhone,

    /// The selected slot is no longer offered
    SlotExpired,
}

/// Field-keyed validation errors; empty when the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<DraftField, FieldError>);

impl ValidationErrors {
    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error recorded for a field.
    pub fn get(&self, field: DraftField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// Check if a field failed.
    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterate over failing fields in field order.
    pub fn iter(&self) -> impl Iterator<Item = (DraftField, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    fn insert(&mut self, field: DraftField, error: FieldError) {
        self.0.insert(field, error);
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a draft against the slots offered right now.
///
/// `offered` must be the current output of [`crate::slots::generate`]; a selection
/// that has dropped out of it fails with [`FieldError::SlotExpired`].
pub fn validate(draft: &OrderDraft<'_>, offered: &[TimeSlot]) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let customer = &draft.customer;
    let visit = draft.delivery_method().requires_visit();

    if is_blank(&customer.name) {
        errors.insert(DraftField::Name, FieldError::Required);
    }

    if is_blank(&customer.phone) {
        errors.insert(DraftField::Phone, FieldError::Required);
    } else if !is_valid_phone(&customer.phone) {
        errors.insert(DraftField::Phone, FieldError::InvalidPhone);
    }

    if visit && !customer.is_same_building && is_blank(&customer.address) {
        errors.insert(DraftField::Address, FieldError::Required);
    }

    if visit && is_blank(&customer.floor) {
        errors.insert(DraftField::Floor, FieldError::Required);
    }

    if visit && is_blank(&customer.apartment) {
        errors.insert(DraftField::Apartment, FieldError::Required);
    }

    if visit {
        match draft.time_slot() {
            None => errors.insert(DraftField::TimeSlot, FieldError::Required),
            Some(id) if find_slot(offered, id).is_none() => {
                errors.insert(DraftField::TimeSlot, FieldError::SlotExpired);
            }
            Some(_) => {}
        }
    }

    errors
}
