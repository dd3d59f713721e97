//! Pressline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calendar::{CalendarError, CalendarRules, ClockTime, DaySchedule, OpenInterval},
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError, Product, ProductId, ProductUpdate},
    config::{ConfigError, ProviderInfo, Settings},
    customer::{CustomerProfile, is_valid_phone, normalize_phone},
    draft::{DraftError, OrderDraft, PaymentMethod},
    handoff::{handoff_link, handoff_message},
    i18n::Language,
    orders::{
        AssembleError, FulfillmentStatus, InMemoryOrderStore, NewOrder, OrderId, OrderRecord,
        OrderStore, OrderStoreError, PaymentStatus, SubmitError, assemble, submit,
    },
    pricing::{
        DeliveryMethod, DeliveryQuote, DeliveryRules, DeliveryRulesError, FeeWaiver, OrderTotals,
        amount_for_free_delivery, price,
    },
    report::{ReportError, write_catalog, write_quote, write_slots},
    slots::{
        LEAD_TIME, SlotGroup, SlotId, TimeSlot, find_slot, format_slot, generate,
        group_slots_by_date,
    },
    validation::{DraftField, FieldError, ValidationErrors, validate},
};
