//! Lesson -> booked students index.
//!
//! # Responsibility
//! - Answer "who is booked in this lesson" without scanning every student.
//! - Detect scheduling conflicts for an edited student.
//!
//! # Invariants
//! - Equals `rebuild(persons)` of the current address book after every
//!   mutation performed through `ModelManager`.
//! - No slot is ever empty; the last removal drops the slot.
//! - Slot contents are sets ordered by `PersonKey`, so booking history never
//!   affects equality or the order names are reported in.

use crate::model::lesson::Lesson;
use crate::model::person::{Person, PersonKey};
use std::collections::{BTreeMap, BTreeSet};

/// Students booked in one lesson, ordered by name then phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonSlot {
    persons: BTreeSet<PersonKey>,
}

impl LessonSlot {
    pub fn persons(&self) -> &BTreeSet<PersonKey> {
        &self.persons
    }

    pub fn number_of_persons(&self) -> usize {
        self.persons.len()
    }

    pub fn contains_person(&self, person: &Person) -> bool {
        self.persons.contains(&person.key())
    }

    /// Booked student names joined for display, e.g. `Alice, Bob`.
    pub fn person_names(&self) -> String {
        self.persons
            .iter()
            .map(|key| key.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A lesson that is already booked by someone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonConflict {
    pub lesson: Lesson,
    pub booked_with: Vec<PersonKey>,
}

/// Index from lesson to the students booked in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonIndex {
    slots: BTreeMap<Lesson, LessonSlot>,
}

impl LessonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from scratch.
    pub fn rebuild(persons: &[Person]) -> Self {
        let mut index = Self::new();
        for person in persons {
            index.add_person(person);
        }
        index
    }

    pub fn has_lesson(&self, lesson: &Lesson) -> bool {
        self.slots.contains_key(lesson)
    }

    pub fn slot(&self, lesson: &Lesson) -> Option<&LessonSlot> {
        self.slots.get(lesson)
    }

    /// Booked lessons in week order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.slots.keys()
    }

    /// Books `person` into each of their lessons.
    pub fn add_person(&mut self, person: &Person) {
        for lesson in person.lessons() {
            self.slots
                .entry(*lesson)
                .or_default()
                .persons
                .insert(person.key());
        }
    }

    /// Removes every booking of `person`.
    pub fn remove_person(&mut self, person: &Person) {
        let key = person.key();
        for lesson in person.lessons() {
            if let Some(slot) = self.slots.get_mut(lesson) {
                slot.persons.remove(&key);
                if slot.persons.is_empty() {
                    self.slots.remove(lesson);
                }
            }
        }
    }

    /// First of `lessons` booked by anyone other than `original` alone.
    ///
    /// A slot holding only `original` is not a conflict: the student is
    /// keeping their own lesson.
    pub fn find_conflict<'a>(
        &self,
        original: Option<&Person>,
        lessons: impl IntoIterator<Item = &'a Lesson>,
    ) -> Option<LessonConflict> {
        lessons.into_iter().find_map(|lesson| {
            let slot = self.slots.get(lesson)?;
            let only_original = slot.number_of_persons() == 1
                && original.is_some_and(|person| slot.contains_person(person));
            if only_original {
                return None;
            }
            Some(LessonConflict {
                lesson: *lesson,
                booked_with: slot
                    .persons
                    .iter()
                    .filter(|key| original.map_or(true, |person| **key != person.key()))
                    .cloned()
                    .collect(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
