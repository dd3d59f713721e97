//! Calendar
//!
//! The weekly opening table: for each weekday either [`DaySchedule::Closed`] or an
//! ordered, non-overlapping list of [`OpenInterval`]s. Tables are validated when they
//! are built, so a [`CalendarRules`] value is always well formed.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::civil::{DateTime, Time, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while building calendar rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// A clock time was not in `HH:MM` form.
    #[error("invalid clock time: {0}")]
    InvalidClockTime(String),

    /// An open day was configured with no intervals.
    #[error("{0:?} is marked open but has no intervals")]
    EmptyDay(Weekday),

    /// An interval ends at or before it starts.
    #[error("{weekday:?} interval {start}-{end} ends before it starts")]
    InvertedInterval {
        /// Day the interval belongs to
        weekday: Weekday,
        /// Interval start
        start: ClockTime,
        /// Interval end
        end: ClockTime,
    },

    /// An interval starts before the previous one has ended.
    #[error("{weekday:?} interval starting {start} overlaps the interval ending {previous_end}")]
    Overlap {
        /// Day the intervals belong to
        weekday: Weekday,
        /// End of the earlier interval
        previous_end: ClockTime,
        /// Start of the offending interval
        start: ClockTime,
    },
}

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(Time);

impl ClockTime {
    /// Create a clock time from an hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidClockTime`] if either component is out of range.
    pub fn new(hour: i8, minute: i8) -> Result<Self, CalendarError> {
        Time::new(hour, minute, 0, 0)
            .map(Self)
            .map_err(|err| CalendarError::InvalidClockTime(format!("{hour}:{minute}: {err}")))
    }

    /// The underlying civil time.
    pub fn time(self) -> Time {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Time::strptime("%H:%M", s.trim())
            .map(Self)
            .map_err(|err| CalendarError::InvalidClockTime(format!("{s}: {err}")))
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

/// A single opening window within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenInterval {
    start: ClockTime,
    end: ClockTime,
}

impl OpenInterval {
    /// Create an interval. Ordering is checked when the interval joins a [`DaySchedule`].
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Opening time
    pub fn start(&self) -> ClockTime {
        self.start
    }

    /// Closing time
    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Whether `time` falls inside the interval, bounds included.
    pub fn contains(&self, time: Time) -> bool {
        self.start.0 <= time && time <= self.end.0
    }
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DaySchedule {
    /// No slots are offered on this day.
    #[default]
    Closed,

    /// Open during the listed intervals, ascending and non-overlapping.
    Open(SmallVec<[OpenInterval; 2]>),
}

impl DaySchedule {
    /// Build an open day, checking the interval invariants.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::EmptyDay`]: no intervals were given.
    /// - [`CalendarError::InvertedInterval`]: an interval does not end after it starts.
    /// - [`CalendarError::Overlap`]: intervals are out of order or overlap.
    pub fn open(
        weekday: Weekday,
        intervals: impl IntoIterator<Item = OpenInterval>,
    ) -> Result<Self, CalendarError> {
        let intervals: SmallVec<[OpenInterval; 2]> = intervals.into_iter().collect();

        if intervals.is_empty() {
            return Err(CalendarError::EmptyDay(weekday));
        }

        let mut previous_end: Option<ClockTime> = None;

        for interval in &intervals {
            if interval.start >= interval.end {
                return Err(CalendarError::InvertedInterval {
                    weekday,
                    start: interval.start,
                    end: interval.end,
                });
            }

            if let Some(previous_end) = previous_end
                && interval.start < previous_end
            {
                return Err(CalendarError::Overlap {
                    weekday,
                    previous_end,
                    start: interval.start,
                });
            }

            previous_end = Some(interval.end);
        }

        Ok(Self::Open(intervals))
    }

    /// The intervals for the day; empty when closed.
    pub fn intervals(&self) -> &[OpenInterval] {
        match self {
            Self::Closed => &[],
            Self::Open(intervals) => intervals,
        }
    }

    /// Check if the day is closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Weekly opening table, one [`DaySchedule`] per weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRules {
    sunday: DaySchedule,
    monday: DaySchedule,
    tuesday: DaySchedule,
    wednesday: DaySchedule,
    thursday: DaySchedule,
    friday: DaySchedule,
    saturday: DaySchedule,
}

impl CalendarRules {
    /// Build a table from per-day schedules, given Sunday first.
    pub fn new(days: [DaySchedule; 7]) -> Self {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] = days;

        Self {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }

    /// Look up the schedule for a weekday.
    pub fn schedule(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    /// Whether the service is open at the given wall-clock time.
    pub fn is_open_at(&self, at: DateTime) -> bool {
        self.schedule(at.weekday())
            .intervals()
            .iter()
            .any(|interval| interval.contains(at.time()))
    }
}
