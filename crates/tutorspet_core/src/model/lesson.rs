//! Weekly recurring lesson slot.
//!
//! # Invariants
//! - A lesson is exactly one weekday plus one minute-precision time of day.
//! - Ordering is Monday-first, then by time.
//! - Text form is canonical: lowercase full day name, one space, `HHmm`.
//!   Input may use any day-name case, the three-letter abbreviation and any
//!   run of whitespace between the parts; all such spellings denote the same
//!   lesson and display identically.

use crate::model::validation::ValidationError;
use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Weekly lesson, e.g. `monday 1400`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lesson {
    day: Weekday,
    time: NaiveTime,
}

impl Lesson {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Lessons should be a day of the week followed by a 24-hour time, e.g. `monday 1400`";

    /// Parses `<day> <HHmm>`; the day is case-insensitive, full or abbreviated.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        parse_lesson(trimmed)
            .ok_or_else(|| ValidationError::new("lesson", trimmed, Self::MESSAGE_CONSTRAINTS))
    }

    pub fn is_valid(value: &str) -> bool {
        parse_lesson(value).is_some()
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Capitalised weekday name, e.g. `Monday`.
    pub fn day_name(&self) -> &'static str {
        match self.day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

fn parse_lesson(value: &str) -> Option<Lesson> {
    let mut parts = value.split_whitespace();
    let day_text = parts.next()?;
    let time_text = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let day = day_text.parse::<Weekday>().ok()?;
    if time_text.len() != 4 || !time_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let time = NaiveTime::parse_from_str(time_text, "%H%M").ok()?;
    Some(Lesson { day, time })
}

impl Ord for Lesson {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day
            .num_days_from_monday()
            .cmp(&other.day.num_days_from_monday())
            .then_with(|| self.time.cmp(&other.time))
    }
}

impl PartialOrd for Lesson {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Lesson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:02}{:02}",
            self.day_name().to_ascii_lowercase(),
            self.time.hour(),
            self.time.minute()
        )
    }
}

impl TryFrom<String> for Lesson {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Lesson> for String {
    fn from(value: Lesson) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Lesson;
    use chrono::Weekday;

    #[test]
    fn parses_full_and_short_day_names() {
        let full = Lesson::new(" Monday 1400 ").unwrap();
        let short = Lesson::new("mon 1400").unwrap();
        assert_eq!(full, short);
        assert_eq!(full.day(), Weekday::Mon);
        assert_eq!(full.to_string(), "monday 1400");
        assert_eq!(full.day_name(), "Monday");
    }

    #[test]
    fn display_is_canonical_for_every_spelling() {
        for spelling in ["monday 1400", "Mon  1400", "MONDAY\t1400", " mon 1400 "] {
            assert_eq!(Lesson::new(spelling).unwrap().to_string(), "monday 1400");
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "monday", "monday 14:00", "monday 2400", "funday 1200", "monday 1200 x", "monday 930"] {
            assert!(Lesson::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn orders_monday_first_then_time() {
        let sunday = Lesson::new("sunday 0800").unwrap();
        let monday_late = Lesson::new("monday 2000").unwrap();
        let monday_early = Lesson::new("monday 0900").unwrap();
        let mut lessons = vec![sunday, monday_late, monday_early];
        lessons.sort();
        assert_eq!(lessons, vec![monday_early, monday_late, sunday]);
    }
}
