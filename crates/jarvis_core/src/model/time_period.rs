//! Lesson time window.
//!
//! # Invariants
//! - `start < end`, checked at construction and on deserialization.
//! - Overlap uses half-open semantics: touching windows do not overlap.

use crate::model::validation::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const DATE_TIME_FORMAT: &str = "%b-%d-%Y %H:%M";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimePeriod")]
pub struct TimePeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawTimePeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimePeriod {
    /// # Errors
    /// - `ValidationError::TimePeriod` unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if !Self::is_valid_time_period(start, end) {
            return Err(ValidationError::TimePeriod);
        }
        Ok(Self { start, end })
    }

    /// Pre-check for callers that want to report before constructing.
    pub fn is_valid_time_period(start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < end
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn has_overlap(&self, other: &TimePeriod) -> bool {
        self.end > other.start && self.start < other.end
    }

    pub fn is_on_same_day(&self) -> bool {
        self.start.date() == self.end.date()
    }
}

impl TryFrom<RawTimePeriod> for TimePeriod {
    type Error = ValidationError;

    fn try_from(value: RawTimePeriod) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}

impl Display for TimePeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let end_format = if self.is_on_same_day() {
            TIME_FORMAT
        } else {
            DATE_TIME_FORMAT
        };
        write!(
            f,
            "{} - {}",
            self.start.format(DATE_TIME_FORMAT),
            self.end.format(end_format)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TimePeriod;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 12, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid test date time")
    }

    #[test]
    fn display_compacts_same_day_periods() {
        let period = TimePeriod::new(at(12, 10), at(12, 11)).unwrap();
        assert_eq!(period.to_string(), "Dec-12-2022 10:00 - 11:00");

        let spanning = TimePeriod::new(at(12, 23), at(13, 1)).unwrap();
        assert_eq!(spanning.to_string(), "Dec-12-2022 23:00 - Dec-13-2022 01:00");
    }
}
