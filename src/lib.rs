//! Pressline
//!
//! Pressline is the ordering core of a neighbourhood ironing service: a weekly opening
//! table expanded into bookable slots, a delivery-fee decision table, draft validation,
//! and order assembly and storage.
//!
//! Every operation takes its configuration and the current time explicitly, so the same
//! inputs always produce the same slots, prices and validation results.

pub mod calendar;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod customer;
pub mod draft;
pub mod handoff;
pub mod i18n;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod slots;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;
