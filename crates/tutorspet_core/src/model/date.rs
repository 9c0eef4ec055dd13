//! Important date model (exam schedules and similar).
//!
//! # Invariants
//! - `Details` always holds a real calendar date-time in `yyyy-MM-dd HHmm`.
//! - Two important dates are the same record only when every field matches.

use crate::model::validation::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Input and display format of `Details`.
pub const DETAILS_FORMAT: &str = "%Y-%m-%d %H%M";

/// Free-text description of an important date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Descriptions can take any values, and it should not be blank";

    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if !Self::is_valid(trimmed) {
            return Err(ValidationError::new(
                "description",
                trimmed,
                Self::MESSAGE_CONSTRAINTS,
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Any text with at least one non-whitespace character.
    pub fn is_valid(value: &str) -> bool {
        !value.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Date-time of an important date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Details(NaiveDateTime);

impl Details {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Details should be a valid date and time in the format yyyy-MM-dd HHmm";

    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        parse_details(trimmed)
            .map(Self)
            .ok_or_else(|| ValidationError::new("details", trimmed, Self::MESSAGE_CONSTRAINTS))
    }

    pub fn is_valid(value: &str) -> bool {
        parse_details(value).is_some()
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.0
    }
}

fn parse_details(value: &str) -> Option<NaiveDateTime> {
    // chrono accepts single-digit fields; the stored format is fixed width.
    if value.len() != "yyyy-MM-dd HHmm".len() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, DETAILS_FORMAT).ok()
}

/// One important date entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportantDate {
    pub description: Description,
    pub details: Details,
}

impl ImportantDate {
    pub fn new(description: Description, details: Details) -> Self {
        Self {
            description,
            details,
        }
    }

    /// Sameness for duplicate detection; identical to full equality.
    pub fn is_same_important_date(&self, other: &ImportantDate) -> bool {
        self == other
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.details.date_time()
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DETAILS_FORMAT))
    }
}

impl Display for ImportantDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.details)
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Details {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Details> for String {
    fn from(value: Details) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Description, Details, ImportantDate};

    #[test]
    fn details_round_trips_fixed_format() {
        let details = Details::new(" 2021-11-03 0800 ").unwrap();
        assert_eq!(details.to_string(), "2021-11-03 0800");
    }

    #[test]
    fn details_rejects_impossible_or_loose_values() {
        for bad in ["2021-02-30 0800", "2021-11-03 2500", "2021-11-3 0800", "03-11-2021 0800", ""] {
            assert!(Details::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn description_rejects_blank() {
        assert!(Description::new("  ").is_err());
        assert!(!Description::is_valid(" \t "));
        assert!(Description::is_valid("Mock Exam"));
        assert_eq!(
            Description::new(" A-Levels Mathematics Paper 1").unwrap().as_str(),
            "A-Levels Mathematics Paper 1"
        );
    }

    #[test]
    fn sameness_requires_every_field() {
        let paper = Description::new("Paper 1").unwrap();
        let first = ImportantDate::new(paper.clone(), Details::new("2021-11-03 0800").unwrap());
        let moved = ImportantDate::new(paper, Details::new("2021-11-04 0800").unwrap());
        assert!(first.is_same_important_date(&first.clone()));
        assert!(!first.is_same_important_date(&moved));
    }
}
