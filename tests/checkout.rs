//! End-to-end checkout with the bundled settings and the in-memory order store.

use jiff::civil::{DateTime, date};
use testresult::TestResult;

use pressline::prelude::*;

fn customer() -> CustomerProfile {
    CustomerProfile {
        name: "Dana Levi".to_string(),
        phone: "050-123-4567".to_string(),
        address: "Bialik 5, Ramat Gan".to_string(),
        floor: "3".to_string(),
        apartment: "12".to_string(),
        ..CustomerProfile::default()
    }
}

fn sunday_morning() -> DateTime {
    date(2026, 10, 18).at(6, 30, 0, 0)
}

#[tokio::test]
async fn customer_orders_and_operator_fulfils() -> TestResult {
    let settings = Settings::bundled()?;
    let store = InMemoryOrderStore::new();

    let mut draft = OrderDraft::with_customer(settings.currency(), customer());

    draft.cart.add(settings.catalog.get(ProductId(2))?)?;
    draft.cart.set_quantity(ProductId(2), 3)?;
    draft.cart.add(settings.catalog.get(ProductId(3))?)?;

    let slots = generate(&settings.calendar, settings.horizon_days, sunday_morning());
    let first = slots.first().ok_or("expected an open slot")?;
    draft.select_slot(first);

    let record = submit(&mut draft, &settings, &store, sunday_morning()).await?;

    assert_eq!(record.order.items_subtotal, 5600);
    assert_eq!(record.order.delivery_fee, 1500);
    assert_eq!(record.order.grand_total, 7100);
    assert_eq!(
        record.order.time_slot.as_ref().map(|slot| slot.id.to_string()),
        Some("2026-10-18_09:00".to_string())
    );
    assert!(draft.cart.is_empty(), "a stored order resets the cart");

    let paid = store.mark_paid(record.id.clone()).await?;
    let ready = store
        .update_status(record.id.clone(), FulfillmentStatus::Ready)
        .await?;

    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(ready.status, FulfillmentStatus::Ready);
    assert_eq!(ready.payment_status, PaymentStatus::Paid);

    let history = store.orders_by_phone("0501234567".to_string()).await?;
    assert_eq!(history.len(), 1);

    Ok(())
}

#[tokio::test]
async fn selection_expires_when_time_moves_on() -> TestResult {
    let settings = Settings::bundled()?;
    let store = InMemoryOrderStore::new();

    let mut draft = OrderDraft::with_customer(settings.currency(), customer());
    draft.cart.add(settings.catalog.get(ProductId(1))?)?;
    draft.select_slot_id(SlotId::from("2026-10-18_09:00"));

    let result = submit(&mut draft, &settings, &store, date(2026, 10, 18).at(7, 30, 0, 0)).await;

    let Err(SubmitError::Assemble(AssembleError::Invalid(errors))) = result else {
        return Err(format!("expected an expired slot, got {result:?}").into());
    };

    assert_eq!(errors.get(DraftField::TimeSlot), Some(FieldError::SlotExpired));
    assert_eq!(errors.len(), 1);
    assert!(store.list_orders().await?.is_empty());
    assert_eq!(draft.cart.item_count(), 1, "the draft survives a refusal");

    Ok(())
}

#[tokio::test]
async fn large_drop_off_order_needs_no_address_or_slot() -> TestResult {
    let settings = Settings::bundled()?;
    let store = InMemoryOrderStore::new();

    let mut draft = OrderDraft::with_customer(
        settings.currency(),
        CustomerProfile {
            name: "Yael".to_string(),
            phone: "0521112233".to_string(),
            ..CustomerProfile::default()
        },
    );

    draft.set_delivery_method(DeliveryMethod::DropOff);
    draft.set_payment_method(PaymentMethod::Cash);
    draft.cart.add(settings.catalog.get(ProductId(5))?)?;
    draft.cart.set_quantity(ProductId(5), 6)?;

    let record = submit(&mut draft, &settings, &store, sunday_morning()).await?;

    assert_eq!(record.order.grand_total, 12000);
    assert_eq!(record.order.delivery_fee, 0);
    assert_eq!(record.order.fee_waiver, Some(FeeWaiver::DropOff));
    assert!(record.order.time_slot.is_none());

    let message = handoff_message(&record.order, Language::Fr, &settings.provider.address);

    assert!(message.contains("Robe longue x6"), "{message}");
    assert!(message.contains("Dépôt sur place"), "{message}");

    Ok(())
}

#[test]
fn cart_above_threshold_ships_free() -> TestResult {
    let settings = Settings::bundled()?;

    let mut draft = OrderDraft::with_customer(settings.currency(), customer());
    draft.cart.add(settings.catalog.get(ProductId(4))?)?;
    draft.cart.set_quantity(ProductId(4), 7)?;

    let quote = draft.quote(&settings.delivery)?;

    assert!(quote.is_free());
    assert_eq!(quote.waiver, Some(FeeWaiver::FreeThreshold));

    Ok(())
}
