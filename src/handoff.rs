//! Hand-off
//!
//! Plain-text order summary sent to the operator over WhatsApp, either as a fallback
//! when the store is unreachable or as the confirmation channel after submission.

use rusty_money::{Money, iso};

use crate::{
    draft::PaymentMethod,
    i18n::Language,
    orders::NewOrder,
    pricing::DeliveryMethod,
};

struct Labels {
    intro: &'static str,
    client: &'static str,
    phone: &'static str,
    address: &'static str,
    floor: &'static str,
    apartment: &'static str,
    notes: &'static str,
    no_notes: &'static str,
    mode: &'static str,
    order: &'static str,
    total: &'static str,
    delivery_included: &'static str,
    time_slot: &'static str,
    payment: &'static str,
    at_delivery: &'static str,
    drop_off: &'static str,
    confirmation: &'static str,
}

const HEBREW: Labels = Labels {
    intro: "🧺 בקשת גיהוץ חדשה",
    client: "לקוח",
    phone: "טלפון",
    address: "כתובת",
    floor: "קומה",
    apartment: "דירה",
    notes: "הערות",
    no_notes: "ללא הערות",
    mode: "אופן מסירה",
    order: "הזמנה",
    total: "💰 סה\"כ",
    delivery_included: "כולל משלוח",
    time_slot: "🕐 מועד",
    payment: "💳 תשלום",
    at_delivery: "במסירה",
    drop_off: "📍 הבאה / החזרה",
    confirmation: "✅ ממתין לאישור בוואטסאפ",
};

const FRENCH: Labels = Labels {
    intro: "🧺 Nouvelle demande de repassage",
    client: "Client",
    phone: "Téléphone",
    address: "Adresse",
    floor: "Étage",
    apartment: "Appartement",
    notes: "Notes",
    no_notes: "Aucune note",
    mode: "Mode de livraison",
    order: "Commande",
    total: "💰 Total",
    delivery_included: "dont livraison",
    time_slot: "🕐 Créneau",
    payment: "💳 Paiement",
    at_delivery: "à la remise",
    drop_off: "📍 Dépôt / retour",
    confirmation: "✅ En attente de confirmation WhatsApp",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::He => &HEBREW,
        Language::Fr => &FRENCH,
    }
}

fn method_name(method: DeliveryMethod, language: Language) -> &'static str {
    match (method, language) {
        (DeliveryMethod::PickupAndReturn, Language::He) => "איסוף והחזרה",
        (DeliveryMethod::PickupAndReturn, Language::Fr) => "Collecte et retour",
        (DeliveryMethod::PickupOnly, Language::He) => "איסוף בלבד",
        (DeliveryMethod::PickupOnly, Language::Fr) => "Collecte seule",
        (DeliveryMethod::ReturnOnly, Language::He) => "החזרה בלבד",
        (DeliveryMethod::ReturnOnly, Language::Fr) => "Retour seul",
        (DeliveryMethod::DropOff, Language::He) => "הבאה עצמית",
        (DeliveryMethod::DropOff, Language::Fr) => "Dépôt sur place",
    }
}

fn payment_name(method: PaymentMethod, language: Language) -> &'static str {
    match (method, language) {
        (PaymentMethod::Cash, Language::He) => "מזומן",
        (PaymentMethod::Cash, Language::Fr) => "Espèces",
        (PaymentMethod::Bit, Language::He) => "ביט",
        (PaymentMethod::Bit, Language::Fr) => "Bit",
    }
}

/// Render stored minor units in the order's currency.
fn amount(minor: i64, code: &str) -> String {
    iso::find(code).map_or_else(
        || format!("{minor} {code}"),
        |currency| Money::from_minor(minor, currency).to_string(),
    )
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// Plain-text summary of an order for the operator.
pub fn handoff_message(order: &NewOrder, language: Language, drop_off_address: &str) -> String {
    let labels = labels(language);
    let customer = &order.customer;

    let items = order
        .lines
        .iter()
        .map(|line| format!("{} x{}", line.name(language), line.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    let slot = order
        .time_slot
        .as_ref()
        .map_or_else(|| "-".to_string(), |slot| slot.label(language));

    let notes = if customer.notes.trim().is_empty() {
        labels.no_notes
    } else {
        customer.notes.as_str()
    };

    let mut lines = vec![
        labels.intro.to_string(),
        String::new(),
        format!("{} : {}", labels.client, customer.name),
        format!("{} : {}", labels.phone, customer.phone),
        String::new(),
    ];

    if order.delivery_method.requires_visit() {
        lines.extend([
            format!("{} :", labels.address),
            customer.address.clone(),
            format!("{} : {}", labels.floor, or_dash(&customer.floor)),
            format!("{} : {}", labels.apartment, or_dash(&customer.apartment)),
            String::new(),
        ]);
    }

    lines.extend([
        format!(
            "{} : {}",
            labels.mode,
            method_name(order.delivery_method, language)
        ),
        format!("{} : {notes}", labels.notes),
        String::new(),
        format!("{} :", labels.order),
        items,
        String::new(),
        format!(
            "{} : {} ({} {})",
            labels.total,
            amount(order.grand_total, &order.currency),
            labels.delivery_included,
            amount(order.delivery_fee, &order.currency)
        ),
        format!("{} : {slot}", labels.time_slot),
        format!(
            "{} : {} ({})",
            labels.payment,
            payment_name(order.payment_method, language),
            labels.at_delivery
        ),
        String::new(),
        format!("{} :", labels.drop_off),
        drop_off_address.to_string(),
        String::new(),
        labels.confirmation.to_string(),
    ]);

    lines.join("\n")
}

/// `wa.me` link that opens a chat with `number` prefilled with `message`.
pub fn handoff_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();

    format!("https://wa.me/{digits}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        calendar::ClockTime,
        catalog::ProductId,
        orders::{CustomerSnapshot, OrderLine, SlotSnapshot},
        slots::SlotId,
    };

    use super::*;

    fn order() -> TestResult<NewOrder> {
        Ok(NewOrder {
            customer: CustomerSnapshot {
                name: "Dana Levi".to_string(),
                phone: "0501234567".to_string(),
                address: "Bialik 5, Ramat Gan".to_string(),
                floor: "3".to_string(),
                apartment: String::new(),
                notes: String::new(),
                is_same_building: false,
            },
            delivery_method: DeliveryMethod::PickupAndReturn,
            delivery_fee: 1500,
            fee_waiver: None,
            time_slot: Some(SlotSnapshot {
                id: SlotId::from("2026-10-19_20:30"),
                date: date(2026, 10, 19),
                start: ClockTime::new(20, 30)?,
                end: ClockTime::new(23, 0)?,
            }),
            payment_method: PaymentMethod::Bit,
            lines: vec![
                OrderLine {
                    product_id: ProductId(2),
                    name_he: "מכופתרת".to_string(),
                    name_fr: "Chemise".to_string(),
                    unit_price: 1500,
                    quantity: 2,
                    line_total: 3000,
                },
                OrderLine {
                    product_id: ProductId(3),
                    name_he: "מכנס".to_string(),
                    name_fr: "Pantalon".to_string(),
                    unit_price: 1150,
                    quantity: 1,
                    line_total: 1150,
                },
            ],
            items_subtotal: 4150,
            grand_total: 5650,
            currency: "ILS".to_string(),
        })
    }

    #[test]
    fn french_message_lists_order_details() -> TestResult {
        let message = handoff_message(&order()?, Language::Fr, "Hatikva 11, Ramat Gan");

        assert!(message.starts_with("🧺 Nouvelle demande de repassage"));
        assert!(message.contains("Client : Dana Levi"));
        assert!(message.contains("Chemise x2, Pantalon x1"));
        assert!(message.contains("💰 Total : ₪56.50 (dont livraison ₪15.00)"));
        assert!(message.contains("🕐 Créneau : Lundi 19/10 • 20:30 - 23:00"));
        assert!(message.contains("Appartement : -"));
        assert!(message.contains("Hatikva 11, Ramat Gan"));
        assert!(message.ends_with("✅ En attente de confirmation WhatsApp"));

        Ok(())
    }

    #[test]
    fn hebrew_message_uses_hebrew_names() -> TestResult {
        let message = handoff_message(&order()?, Language::He, "התקווה 11, רמת גן");

        assert!(message.contains("מכופתרת x2, מכנס x1"));
        assert!(message.contains("ביט"));

        Ok(())
    }

    #[test]
    fn drop_off_message_skips_address_and_slot() -> TestResult {
        let mut order = order()?;
        order.delivery_method = DeliveryMethod::DropOff;
        order.time_slot = None;

        let message = handoff_message(&order, Language::Fr, "Hatikva 11");

        assert!(!message.contains("Bialik"));
        assert!(message.contains("🕐 Créneau : -"));

        Ok(())
    }

    #[test]
    fn amounts_keep_sign_below_one_unit() {
        assert_eq!(amount(-50, "ILS"), "-₪0.50");
        assert_eq!(amount(0, "ILS"), "₪0.00");
        assert_eq!(amount(125_000, "ILS"), "₪1,250.00");
        assert_eq!(amount(700, "XYZ"), "700 XYZ");
    }

    #[test]
    fn link_encodes_reserved_characters() {
        let link = handoff_link("0501234567", "Note: 50% off? (a/b) #2");

        assert_eq!(
            link,
            "https://wa.me/0501234567?text=Note%3A%2050%25%20off%3F%20%28a%2Fb%29%20%232"
        );
    }

    #[test]
    fn link_percent_encodes_message() {
        let link = handoff_link("+972 50-123-4567", "Bonjour Dana & co\nÉtage 3");

        assert_eq!(
            link,
            "https://wa.me/972501234567?text=Bonjour%20Dana%20%26%20co%0A%C3%89tage%203"
        );
    }
}
