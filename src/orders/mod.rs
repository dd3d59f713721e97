//! Orders
//!
//! From a submitted draft to a stored order: [`assemble`] freezes the draft into a
//! [`NewOrder`], an [`OrderStore`] persists it as an [`OrderRecord`], and [`submit`]
//! ties the two together.

pub mod assemble;
pub mod models;
pub mod store;
pub mod submit;

pub use assemble::{AssembleError, assemble};
pub use models::{
    CustomerSnapshot, FulfillmentStatus, NewOrder, OrderId, OrderLine, OrderRecord,
    PaymentStatus, SlotSnapshot,
};
pub use store::{InMemoryOrderStore, MockOrderStore, OrderStore, OrderStoreError};
pub use submit::{SubmitError, submit};
