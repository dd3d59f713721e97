use jiff::civil::Weekday;
use rusty_money::{
    Money,
    iso::{Currency, ILS},
};

use crate::{
    calendar::{CalendarError, CalendarRules, ClockTime, DaySchedule, OpenInterval},
    catalog::{Product, ProductId},
    pricing::{DeliveryRules, DeliveryRulesError},
};

pub(crate) fn shekels(major: i64) -> Money<'static, Currency> {
    Money::from_minor(major * 100, ILS)
}

pub(crate) fn garment(id: u32, name_fr: &str, price_major: i64) -> Product<'static> {
    let name_he = match id {
        1 => "טי שירט",
        2 => "מכופתרת",
        3 => "מכנס",
        4 => "שמלה קצרה",
        5 => "שמלה ארוכה",
        6 => "חצאית קצרה",
        7 => "חצאית ארוכה",
        _ => "",
    };

    Product {
        id: ProductId(id),
        name_he: name_he.to_string(),
        name_fr: name_fr.to_string(),
        price: shekels(price_major),
        active: true,
    }
}

pub(crate) fn delivery_rules() -> Result<DeliveryRules<'static>, DeliveryRulesError> {
    DeliveryRules::new(shekels(15), shekels(10), shekels(10), shekels(100))
}

fn interval(start: &str, end: &str) -> Result<OpenInterval, CalendarError> {
    Ok(OpenInterval::new(start.parse()?, end.parse()?))
}

fn open(weekday: Weekday, ranges: &[(&str, &str)]) -> Result<DaySchedule, CalendarError> {
    let intervals = ranges
        .iter()
        .map(|(start, end)| interval(start, end))
        .collect::<Result<Vec<_>, _>>()?;

    DaySchedule::open(weekday, intervals)
}

/// Sunday 09:00-14:00 and 19:00-23:00, Monday to Thursday 20:30-23:00,
/// Friday 09:00-15:00, Saturday closed.
pub(crate) fn weekly_calendar() -> Result<CalendarRules, CalendarError> {
    let evening = [("20:30", "23:00")];

    Ok(CalendarRules::new([
        open(Weekday::Sunday, &[("09:00", "14:00"), ("19:00", "23:00")])?,
        open(Weekday::Monday, &evening)?,
        open(Weekday::Tuesday, &evening)?,
        open(Weekday::Wednesday, &evening)?,
        open(Weekday::Thursday, &evening)?,
        open(Weekday::Friday, &[("09:00", "15:00")])?,
        DaySchedule::Closed,
    ]))
}

#[test]
fn weekly_calendar_builds() -> testresult::TestResult {
    let calendar = weekly_calendar()?;

    assert!(calendar.schedule(Weekday::Saturday).is_closed());
    assert_eq!(
        calendar.schedule(Weekday::Sunday).intervals().len(),
        2,
        "Sunday has a morning and an evening window"
    );
    assert_eq!(ClockTime::new(20, 30)?.to_string(), "20:30");

    Ok(())
}
