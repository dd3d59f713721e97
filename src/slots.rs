//! Time Slots
//!
//! Expands the weekly [`CalendarRules`] over a rolling horizon into concrete, dated
//! slots. Generation is a pure function of its arguments: the caller supplies `now`,
//! so two calls with the same inputs always agree, and a slot's [`SlotId`] is derived
//! from its date and start time so it can be recognised again after regeneration.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{
    SignedDuration, ToSpan,
    civil::{Date, DateTime, Weekday},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    calendar::{CalendarRules, ClockTime, OpenInterval},
    i18n::Language,
};

/// Minimum preparation time between `now` and the start of an offered slot.
pub const LEAD_TIME: SignedDuration = SignedDuration::from_hours(2);

/// Stable slot identifier, `<YYYY-MM-DD>_<HH:MM>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Derive the identifier for the slot starting at `start` on `date`.
    pub fn new(date: Date, start: ClockTime) -> Self {
        Self(format!("{date}_{start}"))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlotId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SlotId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// A concrete, orderable pickup/return window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    id: SlotId,
    date: Date,
    weekday: Weekday,
    start: ClockTime,
    end: ClockTime,
}

impl TimeSlot {
    fn new(date: Date, interval: OpenInterval) -> Self {
        Self {
            id: SlotId::new(date, interval.start()),
            date,
            weekday: date.weekday(),
            start: interval.start(),
            end: interval.end(),
        }
    }

    /// Stable identifier
    pub fn id(&self) -> &SlotId {
        &self.id
    }

    /// Calendar date of the slot
    pub fn date(&self) -> Date {
        self.date
    }

    /// Weekday of the slot
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Window start
    pub fn start(&self) -> ClockTime {
        self.start
    }

    /// Window end
    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// The slot's concrete start.
    pub fn starts_at(&self) -> DateTime {
        self.date.to_datetime(self.start.time())
    }
}

/// Generate the slots offered at `now` for the next `horizon_days` calendar days.
///
/// Days run from `now`'s date inclusive. Closed days contribute nothing, and any slot
/// starting less than [`LEAD_TIME`] after `now` is dropped. Output is chronological.
/// An empty result is a normal outcome.
pub fn generate(calendar: &CalendarRules, horizon_days: u32, now: DateTime) -> Vec<TimeSlot> {
    let Ok(cutoff) = now.checked_add(LEAD_TIME) else {
        return Vec::new();
    };

    let days = usize::try_from(horizon_days).unwrap_or(usize::MAX);

    let slots: Vec<TimeSlot> = now
        .date()
        .series(1.day())
        .take(days)
        .flat_map(|date| {
            calendar
                .schedule(date.weekday())
                .intervals()
                .iter()
                .map(move |interval| TimeSlot::new(date, *interval))
        })
        .filter(|slot| slot.starts_at() >= cutoff)
        .collect();

    debug!(%now, horizon_days, slots = slots.len(), "generated time slots");

    slots
}

/// Find a slot by id in a generated sequence.
pub fn find_slot<'s>(slots: &'s [TimeSlot], id: &SlotId) -> Option<&'s TimeSlot> {
    slots.iter().find(|slot| slot.id() == id)
}

/// Slots sharing a date, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGroup<'s> {
    /// Date shared by every slot in the group
    pub date: Date,

    /// Slots on that date
    pub slots: Vec<&'s TimeSlot>,
}

/// Partition slots by date, preserving the order of first appearance.
pub fn group_slots_by_date(slots: &[TimeSlot]) -> Vec<SlotGroup<'_>> {
    let mut groups: Vec<SlotGroup<'_>> = Vec::new();

    for slot in slots {
        match groups.iter_mut().find(|group| group.date == slot.date) {
            Some(group) => group.slots.push(slot),
            None => groups.push(SlotGroup {
                date: slot.date,
                slots: vec![slot],
            }),
        }
    }

    groups
}

/// Human readable label, e.g. `Lundi 19/10 • 20:30 - 23:00`.
pub fn format_slot(slot: &TimeSlot, language: Language) -> String {
    slot_label(slot.date, slot.start, slot.end, language)
}

pub(crate) fn slot_label(
    date: Date,
    start: ClockTime,
    end: ClockTime,
    language: Language,
) -> String {
    format!(
        "{} {:02}/{:02} • {start} - {end}",
        language.weekday_name(date.weekday()),
        date.day(),
        date.month(),
    )
}
