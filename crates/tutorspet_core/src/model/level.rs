//! Education level of a student.
//!
//! # Responsibility
//! - Enumerate the supported levels in progression order.
//! - Provide one-step progression with an explicit boundary policy.
//!
//! # Invariants
//! - The label and the enumeration position are derived from the same variant
//!   and can never disagree.
//! - Progression past `Jc2` or below `Pri1` is an error, never a wrap-around.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Supported education levels, in progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Pri1,
    Pri2,
    Pri3,
    Pri4,
    Pri5,
    Pri6,
    Sec1,
    Sec2,
    Sec3,
    Sec4,
    Jc1,
    Jc2,
}

/// Raised when a level cannot move further in the requested direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("`{0}` is already the highest level")]
    NoHigherLevel(Level),
    #[error("`{0}` is already the lowest level")]
    NoLowerLevel(Level),
}

const ALL_LEVELS: [Level; 12] = [
    Level::Pri1,
    Level::Pri2,
    Level::Pri3,
    Level::Pri4,
    Level::Pri5,
    Level::Pri6,
    Level::Sec1,
    Level::Sec2,
    Level::Sec3,
    Level::Sec4,
    Level::Jc1,
    Level::Jc2,
];

impl Level {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Level can only be [pri1] to [pri6], [sec1] to [sec4] or [jc1] to [jc2].";

    /// Parses a level label, case-insensitive after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        ALL_LEVELS
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::new("level", trimmed, Self::MESSAGE_CONSTRAINTS))
    }

    pub fn is_valid(value: &str) -> bool {
        ALL_LEVELS.iter().any(|level| level.as_str() == value)
    }

    /// All levels in progression order.
    pub fn all() -> &'static [Level] {
        &ALL_LEVELS
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pri1 => "pri1",
            Self::Pri2 => "pri2",
            Self::Pri3 => "pri3",
            Self::Pri4 => "pri4",
            Self::Pri5 => "pri5",
            Self::Pri6 => "pri6",
            Self::Sec1 => "sec1",
            Self::Sec2 => "sec2",
            Self::Sec3 => "sec3",
            Self::Sec4 => "sec4",
            Self::Jc1 => "jc1",
            Self::Jc2 => "jc2",
        }
    }

    /// 1-based enumeration position (`pri1` is 1, `jc2` is 12).
    pub fn index(self) -> usize {
        self as usize + 1
    }

    /// Returns the level one step higher.
    pub fn next(self) -> Result<Level, LevelError> {
        ALL_LEVELS
            .get(self as usize + 1)
            .copied()
            .ok_or(LevelError::NoHigherLevel(self))
    }

    /// Returns the level one step lower.
    pub fn previous(self) -> Result<Level, LevelError> {
        (self as usize)
            .checked_sub(1)
            .map(|position| ALL_LEVELS[position])
            .ok_or(LevelError::NoLowerLevel(self))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Level {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for String {
    fn from(value: Level) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, LevelError};

    #[test]
    fn parse_is_case_insensitive_and_trimmed() {
        assert_eq!(Level::new(" SEC3 ").unwrap(), Level::Sec3);
        assert!(Level::new("sec5").is_err());
        assert!(Level::new("").is_err());
    }

    #[test]
    fn rejection_reports_trimmed_input() {
        let err = Level::new("  Sec5 ").unwrap_err();
        assert_eq!(err.field, "level");
        assert_eq!(err.value, "Sec5");
    }

    #[test]
    fn index_matches_label_position() {
        for (position, level) in Level::all().iter().enumerate() {
            assert_eq!(level.index(), position + 1);
            assert_eq!(Level::new(level.as_str()).unwrap(), *level);
        }
    }

    #[test]
    fn next_then_previous_round_trips_inside_range() {
        for level in &Level::all()[..Level::all().len() - 1] {
            assert_eq!(level.next().unwrap().previous().unwrap(), *level);
        }
        assert_eq!(Level::Pri6.next().unwrap(), Level::Sec1);
        assert_eq!(Level::Jc1.previous().unwrap(), Level::Sec4);
    }

    #[test]
    fn boundaries_fail_instead_of_wrapping() {
        assert_eq!(Level::Jc2.next(), Err(LevelError::NoHigherLevel(Level::Jc2)));
        assert_eq!(Level::Pri1.previous(), Err(LevelError::NoLowerLevel(Level::Pri1)));
    }

    #[test]
    fn ordering_follows_progression() {
        assert!(Level::Pri6 < Level::Sec1);
        assert!(Level::Sec4 < Level::Jc1);
    }
}
