//! Order Submission

use jiff::civil::DateTime;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::Settings,
    draft::OrderDraft,
    orders::{
        assemble::{AssembleError, assemble},
        models::OrderRecord,
        store::{OrderStore, OrderStoreError},
    },
};

/// Submission error variants.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft could not be turned into an order.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// The store rejected the order or could not be reached.
    #[error(transparent)]
    Store(#[from] OrderStoreError),
}

/// Assemble and store the draft's order, then reset the draft.
///
/// The draft is only cleared once the store has accepted the order; on any error it is
/// left exactly as it was so the customer can correct it or retry.
///
/// # Errors
///
/// - [`SubmitError::Assemble`]: the draft is invalid, empty or cannot be priced.
/// - [`SubmitError::Store`]: the store failed.
#[tracing::instrument(skip_all, fields(method = ?draft.delivery_method(), %now))]
pub async fn submit<S>(
    draft: &mut OrderDraft<'_>,
    settings: &Settings<'_>,
    store: &S,
    now: DateTime,
) -> Result<OrderRecord, SubmitError>
where
    S: OrderStore + ?Sized,
{
    let order = assemble(draft, settings, now)?;

    let record = store.create_order(order).await.inspect_err(|error| {
        warn!(%error, "order store rejected submission");
    })?;

    draft.clear();

    info!(id = %record.id, "order submitted");

    Ok(record)
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use testresult::TestResult;

    use crate::{
        catalog::ProductId,
        customer::CustomerProfile,
        orders::{
            models::{FulfillmentStatus, OrderId, PaymentStatus},
            store::{InMemoryOrderStore, MockOrderStore},
        },
        slots::SlotId,
    };

    use super::*;

    fn saturday_noon() -> DateTime {
        date(2026, 10, 17).at(12, 0, 0, 0)
    }

    fn ready_draft<'a>(settings: &Settings<'a>) -> TestResult<OrderDraft<'a>> {
        let mut draft = OrderDraft::with_customer(
            settings.currency(),
            CustomerProfile {
                name: "Dana Levi".to_string(),
                phone: "0501234567".to_string(),
                address: "Bialik 5, Ramat Gan".to_string(),
                floor: "3".to_string(),
                apartment: "12".to_string(),
                ..CustomerProfile::default()
            },
        );

        draft.cart.add(settings.catalog.get(ProductId(1))?)?;
        draft.select_slot_id(SlotId::from("2026-10-19_20:30"));

        Ok(draft)
    }

    #[tokio::test]
    async fn submit_stores_order_and_clears_draft() -> TestResult {
        let settings = Settings::bundled()?;
        let store = InMemoryOrderStore::new();
        let mut draft = ready_draft(&settings)?;

        let record = submit(&mut draft, &settings, &store, saturday_noon()).await?;

        assert_eq!(record.order.grand_total, 2200);
        assert_eq!(store.get_order(record.id.clone()).await?, record);
        assert!(draft.cart.is_empty());
        assert!(draft.time_slot().is_none());
        assert_eq!(draft.customer.name, "Dana Levi");

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_leaves_draft_intact() -> TestResult {
        let settings = Settings::bundled()?;
        let mut draft = ready_draft(&settings)?;

        let mut store = MockOrderStore::new();

        store
            .expect_create_order()
            .once()
            .return_once(|_| Err(OrderStoreError::Unavailable("offline".to_string())));

        store.expect_list_orders().never();

        let result = submit(&mut draft, &settings, &store, saturday_noon()).await;

        assert!(
            matches!(result, Err(SubmitError::Store(OrderStoreError::Unavailable(_)))),
            "expected Unavailable, got {result:?}"
        );
        assert_eq!(draft.cart.item_count(), 1);
        assert_eq!(draft.time_slot(), Some(&SlotId::from("2026-10-19_20:30")));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_store() -> TestResult {
        let settings = Settings::bundled()?;
        let mut draft = ready_draft(&settings)?;
        draft.customer.phone.clear();

        let mut store = MockOrderStore::new();
        store.expect_create_order().never();

        let result = submit(&mut draft, &settings, &store, saturday_noon()).await;

        assert!(
            matches!(result, Err(SubmitError::Assemble(AssembleError::Invalid(_)))),
            "expected Invalid, got {result:?}"
        );
        assert!(!draft.cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn mocked_store_receives_assembled_order() -> TestResult {
        let settings = Settings::bundled()?;
        let mut draft = ready_draft(&settings)?;

        let mut store = MockOrderStore::new();

        store
            .expect_create_order()
            .once()
            .withf(|order| order.grand_total == 2200 && order.lines.len() == 1)
            .return_once(|order| {
                Ok(OrderRecord {
                    id: OrderId::from("ORD-0000CAFE"),
                    order,
                    status: FulfillmentStatus::Received,
                    payment_status: PaymentStatus::Pending,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let record = submit(&mut draft, &settings, &store, saturday_noon()).await?;

        assert_eq!(record.id, OrderId::from("ORD-0000CAFE"));
        assert!(draft.cart.is_empty());

        Ok(())
    }
}
