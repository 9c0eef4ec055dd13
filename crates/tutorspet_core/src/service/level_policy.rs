//! Batch level progression.
//!
//! # Responsibility
//! - Move students one level up or down.
//! - Keep batch operations total: a single student never fails the batch.
//!
//! # Invariants
//! - Students without a level are left untouched.
//! - Students already at the top/bottom level are left untouched and reported.
//! - Only the `level` field changes; identity is preserved.

use crate::model::level::{Level, LevelError};
use crate::model::person::{Person, PersonKey};

/// Direction of a level shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelDirection {
    Up,
    Down,
}

impl LevelDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    fn step(self, level: Level) -> Result<Level, LevelError> {
        match self {
            Self::Up => level.next(),
            Self::Down => level.previous(),
        }
    }
}

/// Result of shifting a batch of students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelShiftOutcome {
    /// One entry per input student, in input order.
    pub persons: Vec<Person>,
    /// Number of students whose level changed.
    pub shifted: usize,
    /// Students skipped because they have no level.
    pub without_level: Vec<PersonKey>,
    /// Students skipped because no further level exists.
    pub at_boundary: Vec<PersonKey>,
}

/// Shifts one student's level.
///
/// Returns `Ok(None)` when the student has no level.
pub fn shift_level(person: &Person, direction: LevelDirection) -> Result<Option<Person>, LevelError> {
    let Some(level) = person.level() else {
        return Ok(None);
    };
    let shifted = direction.step(level)?;
    Ok(Some(person.with_level(Some(shifted))))
}

/// Shifts every student in `persons`; never fails as a whole.
pub fn apply_to_all(persons: &[Person], direction: LevelDirection) -> LevelShiftOutcome {
    let mut outcome = LevelShiftOutcome {
        persons: Vec::with_capacity(persons.len()),
        shifted: 0,
        without_level: Vec::new(),
        at_boundary: Vec::new(),
    };

    for person in persons {
        match shift_level(person, direction) {
            Ok(Some(shifted)) => {
                outcome.shifted += 1;
                outcome.persons.push(shifted);
            }
            Ok(None) => {
                outcome.without_level.push(person.key());
                outcome.persons.push(person.clone());
            }
            Err(_) => {
                outcome.at_boundary.push(person.key());
                outcome.persons.push(person.clone());
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::{apply_to_all, shift_level, LevelDirection};
    use crate::model::fields::{Name, Phone};
    use crate::model::level::{Level, LevelError};
    use crate::model::person::Person;

    fn student(name: &str, level: Option<Level>) -> Person {
        Person::builder(Name::new(name).unwrap(), Phone::new("91234567").unwrap())
            .level(level)
            .build()
    }

    #[test]
    fn up_then_down_restores_level() {
        let original = student("Amy", Some(Level::Sec4));
        let up = shift_level(&original, LevelDirection::Up).unwrap().unwrap();
        assert_eq!(up.level(), Some(Level::Jc1));
        let down = shift_level(&up, LevelDirection::Down).unwrap().unwrap();
        assert_eq!(down, original);
    }

    #[test]
    fn single_shift_reports_boundary() {
        let top = student("Top", Some(Level::Jc2));
        assert_eq!(
            shift_level(&top, LevelDirection::Up),
            Err(LevelError::NoHigherLevel(Level::Jc2))
        );
        assert_eq!(shift_level(&student("None", None), LevelDirection::Up), Ok(None));
    }

    #[test]
    fn batch_is_total() {
        let persons = vec![
            student("Amy", Some(Level::Pri1)),
            student("Ben", None),
            student("Cal", Some(Level::Jc2)),
        ];
        let outcome = apply_to_all(&persons, LevelDirection::Up);
        assert_eq!(outcome.shifted, 1);
        assert_eq!(outcome.persons[0].level(), Some(Level::Pri2));
        assert_eq!(outcome.persons[1], persons[1]);
        assert_eq!(outcome.persons[2], persons[2]);
        assert_eq!(outcome.without_level, vec![persons[1].key()]);
        assert_eq!(outcome.at_boundary, vec![persons[2].key()]);
    }
}
