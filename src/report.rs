//! Report
//!
//! Console tables for the catalog, the offered slots and a priced draft.

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::CartError,
    catalog::Catalog,
    draft::{DraftError, OrderDraft},
    i18n::Language,
    pricing::{DeliveryRules, FeeWaiver},
    slots::{TimeSlot, group_slots_by_date},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Output could not be written.
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),

    /// The draft could not be priced.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// A cart line total overflowed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

fn render(builder: Builder, right_aligned: Columns<Range<usize>>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(right_aligned, Alignment::right());

    table.to_string()
}

/// Write the active products as a table.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_catalog(
    mut out: impl io::Write,
    catalog: &Catalog<'_>,
    language: Language,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Garment", "Price"]);

    for product in catalog.active() {
        builder.push_record([
            product.id.to_string(),
            product.name(language).to_string(),
            product.price.to_string(),
        ]);
    }

    writeln!(out, "{}", render(builder, Columns::new(2..3)))?;

    Ok(())
}

/// Write offered slots, one row per date.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_slots(
    mut out: impl io::Write,
    slots: &[TimeSlot],
    language: Language,
) -> Result<(), ReportError> {
    if slots.is_empty() {
        writeln!(out, "No slots available")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Date", "Day", "Slots"]);

    for group in group_slots_by_date(slots) {
        let windows = group
            .slots
            .iter()
            .map(|slot| format!("{} - {}", slot.start(), slot.end()))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            format!("{:02}/{:02}", group.date.day(), group.date.month()),
            language.weekday_name(group.date.weekday()).to_string(),
            windows,
        ]);
    }

    writeln!(out, "{}", render(builder, Columns::new(0..1)))?;

    Ok(())
}

fn waiver_label(waiver: Option<FeeWaiver>) -> &'static str {
    match waiver {
        None => "-",
        Some(FeeWaiver::DropOff) => "drop-off",
        Some(FeeWaiver::SameBuilding) => "same building",
        Some(FeeWaiver::FreeThreshold) => "free-delivery threshold",
    }
}

/// Write the cart lines and the delivery quote of a draft.
///
/// # Errors
///
/// - [`ReportError::Draft`] or [`ReportError::Cart`]: the draft cannot be priced.
/// - [`ReportError::Io`]: the output cannot be written.
pub fn write_quote<'a>(
    mut out: impl io::Write,
    draft: &OrderDraft<'a>,
    rules: &DeliveryRules<'a>,
    language: Language,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Garment", "Qty", "Unit", "Total"]);

    for line in draft.cart.iter() {
        builder.push_record([
            line.name(language).to_string(),
            line.quantity().to_string(),
            line.unit_price().to_string(),
            line.total()?.to_string(),
        ]);
    }

    let quote = draft.quote(rules)?;
    let totals = draft.totals(rules)?;
    let remaining = draft.amount_for_free_delivery(rules)?;

    writeln!(out, "{}", render(builder, Columns::new(1..4)))?;

    let summary = [
        ("Subtotal", totals.items.to_string()),
        ("Delivery", totals.delivery.to_string()),
        ("Waiver", waiver_label(quote.waiver).to_string()),
        ("Total", totals.grand.to_string()),
        ("Until free delivery", remaining.to_string()),
    ];

    let width = summary
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or_default();

    for (label, value) in summary {
        writeln!(out, " {label:<width$}  {value}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::ILS;
    use testresult::TestResult;

    use crate::{
        catalog::ProductId,
        pricing::DeliveryMethod,
        slots::generate,
        test_support::{delivery_rules, garment, weekly_calendar},
    };

    use super::*;

    #[test]
    fn catalog_table_lists_active_products() -> TestResult {
        let mut skirt = garment(6, "Jupe courte", 10);
        skirt.active = false;

        let catalog = Catalog::with_products([garment(1, "T-shirt", 7), skirt], ILS)?;

        let mut out = Vec::new();
        write_catalog(&mut out, &catalog, Language::Fr)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("T-shirt"));
        assert!(!text.contains("Jupe courte"));

        Ok(())
    }

    #[test]
    fn slot_table_groups_by_date() -> TestResult {
        let slots = generate(&weekly_calendar()?, 2, date(2026, 10, 18).at(6, 0, 0, 0));

        let mut out = Vec::new();
        write_slots(&mut out, &slots, Language::Fr)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("18/10"));
        assert!(text.contains("09:00 - 14:00"));
        assert!(text.contains("19:00 - 23:00"));
        assert!(text.contains("Lundi"));

        Ok(())
    }

    #[test]
    fn empty_slot_list_says_so() -> TestResult {
        let mut out = Vec::new();
        write_slots(&mut out, &[], Language::He)?;

        assert_eq!(String::from_utf8(out)?, "No slots available\n");

        Ok(())
    }

    #[test]
    fn quote_reports_waiver() -> TestResult {
        let mut draft = OrderDraft::new(ILS);
        draft.cart.add(&garment(2, "Chemise", 15))?;
        draft.set_delivery_method(DeliveryMethod::DropOff);
        draft.cart.increment(ProductId(2))?;

        let mut out = Vec::new();
        write_quote(&mut out, &draft, &delivery_rules()?, Language::Fr)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Chemise"));
        assert!(text.contains("drop-off"));
        assert!(text.contains("Until free delivery"));

        Ok(())
    }
}
