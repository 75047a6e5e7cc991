//! Date bounds for filtering readings.

use crate::errors::KpDataErr;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::str::FromStr;

/// A bound on the time window, either a calendar date or an instant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DateInput {
    /// A calendar date with no time of day, taken as midnight at the start of the day.
    Date(NaiveDate),
    /// An exact instant.
    DateTime(NaiveDateTime),
}

impl DateInput {
    /// Normalize to an instant.
    pub fn normalize(self) -> NaiveDateTime {
        match self {
            DateInput::Date(date) => date.and_time(NaiveTime::MIN),
            DateInput::DateTime(instant) => instant,
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(instant: NaiveDateTime) -> Self {
        DateInput::DateTime(instant)
    }
}

impl FromStr for DateInput {
    type Err = KpDataErr;

    /// Parse `YYYY-MM-DD` as a date, or `YYYY-MM-DDTHH:MM[:SS[.f]]` as an instant. A space may
    /// replace the `T`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const INSTANT_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];

        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(DateInput::Date(date));
        }

        INSTANT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(DateInput::DateTime)
            .ok_or_else(|| {
                KpDataErr::InvalidArgument(format!("not a date or date and time: '{}'", s))
            })
    }
}

/// An inclusive window of time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DateRange {
    begin: NaiveDateTime,
    end: NaiveDateTime,
}

impl Default for DateRange {
    /// A window covering every representable instant.
    fn default() -> Self {
        DateRange {
            begin: NaiveDateTime::MIN,
            end: NaiveDateTime::MAX,
        }
    }
}

impl DateRange {
    /// Create a new range, a missing bound leaves that side open.
    pub fn new(begin: Option<DateInput>, end: Option<DateInput>) -> Self {
        let unbounded = Self::default();

        DateRange {
            begin: begin.map(DateInput::normalize).unwrap_or(unbounded.begin),
            end: end.map(DateInput::normalize).unwrap_or(unbounded.end),
        }
    }

    /// Get the earliest instant in the range.
    pub fn begin(&self) -> NaiveDateTime {
        self.begin
    }

    /// Get the latest instant in the range.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Check if an instant is in the range, both ends included.
    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        self.begin <= *instant && *instant <= self.end
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
