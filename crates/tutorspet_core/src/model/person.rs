//! Student record aggregate.
//!
//! # Responsibility
//! - Combine validated value objects into one student record.
//! - Expose identity (`is_same_person`) separately from full-field equality.
//!
//! # Invariants
//! - `name` and `phone` are always present; every other field is optional.
//! - A person is replaced wholesale on edit, never mutated in place.

use crate::model::fields::{Address, Email, Name, Phone, School, Subject};
use crate::model::lesson::Lesson;
use crate::model::level::Level;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Identity of a person: the `(name, phone)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonKey {
    pub name: Name,
    pub phone: Phone,
}

impl Display for PersonKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_str())
    }
}

/// Student record.
///
/// `PartialEq` compares every field; use [`Person::is_same_person`] for
/// duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: Name,
    phone: Phone,
    school: Option<School>,
    email: Option<Email>,
    address: Option<Address>,
    guardian_name: Option<Name>,
    guardian_phone: Option<Phone>,
    level: Option<Level>,
    subjects: BTreeSet<Subject>,
    lessons: BTreeSet<Lesson>,
}

impl Person {
    /// Starts building a person from the required fields.
    pub fn builder(name: Name, phone: Phone) -> PersonBuilder {
        PersonBuilder {
            person: Person {
                name,
                phone,
                school: None,
                email: None,
                address: None,
                guardian_name: None,
                guardian_phone: None,
                level: None,
                subjects: BTreeSet::new(),
                lessons: BTreeSet::new(),
            },
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn school(&self) -> Option<&School> {
        self.school.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn guardian_name(&self) -> Option<&Name> {
        self.guardian_name.as_ref()
    }

    pub fn guardian_phone(&self) -> Option<&Phone> {
        self.guardian_phone.as_ref()
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn subjects(&self) -> &BTreeSet<Subject> {
        &self.subjects
    }

    pub fn lessons(&self) -> &BTreeSet<Lesson> {
        &self.lessons
    }

    /// Identity key used by the lesson index.
    pub fn key(&self) -> PersonKey {
        PersonKey {
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Returns true when both records describe the same student
    /// (same name and same phone), regardless of other fields.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name && self.phone == other.phone
    }

    /// Returns a copy with only the level replaced.
    pub fn with_level(&self, level: Option<Level>) -> Person {
        Person {
            level,
            ..self.clone()
        }
    }

    /// Earliest lesson in the week, if any.
    pub fn earliest_lesson(&self) -> Option<&Lesson> {
        self.lessons.first()
    }

    pub(crate) fn into_builder(self) -> PersonBuilder {
        PersonBuilder { person: self }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}; Phone: {}", self.name, self.phone)?;
        if let Some(school) = &self.school {
            write!(f, "; School: {school}")?;
        }
        if let Some(level) = self.level {
            write!(f, "; Level: {level}")?;
        }
        if !self.subjects.is_empty() {
            let subjects: Vec<&str> = self.subjects.iter().map(Subject::as_str).collect();
            write!(f, "; Subjects: {}", subjects.join(", "))?;
        }
        if !self.lessons.is_empty() {
            let lessons: Vec<String> = self.lessons.iter().map(Lesson::to_string).collect();
            write!(f, "; Lessons: {}", lessons.join(", "))?;
        }
        Ok(())
    }
}

/// Chained construction of a [`Person`].
#[derive(Debug, Clone)]
pub struct PersonBuilder {
    person: Person,
}

impl PersonBuilder {
    pub fn name(mut self, name: Name) -> Self {
        self.person.name = name;
        self
    }

    pub fn phone(mut self, phone: Phone) -> Self {
        self.person.phone = phone;
        self
    }

    pub fn school(mut self, school: Option<School>) -> Self {
        self.person.school = school;
        self
    }

    pub fn email(mut self, email: Option<Email>) -> Self {
        self.person.email = email;
        self
    }

    pub fn address(mut self, address: Option<Address>) -> Self {
        self.person.address = address;
        self
    }

    pub fn guardian_name(mut self, guardian_name: Option<Name>) -> Self {
        self.person.guardian_name = guardian_name;
        self
    }

    pub fn guardian_phone(mut self, guardian_phone: Option<Phone>) -> Self {
        self.person.guardian_phone = guardian_phone;
        self
    }

    pub fn level(mut self, level: Option<Level>) -> Self {
        self.person.level = level;
        self
    }

    pub fn subjects(mut self, subjects: impl IntoIterator<Item = Subject>) -> Self {
        self.person.subjects = subjects.into_iter().collect();
        self
    }

    pub fn lessons(mut self, lessons: impl IntoIterator<Item = Lesson>) -> Self {
        self.person.lessons = lessons.into_iter().collect();
        self
    }

    pub fn build(self) -> Person {
        self.person
    }
}

#[cfg(test)]
mod tests {
    use super::Person;
    use crate::model::fields::{Name, Phone, School};
    use crate::model::lesson::Lesson;
    use crate::model::level::Level;

    fn alice() -> Person {
        Person::builder(Name::new("Alice Pauline").unwrap(), Phone::new("94351253").unwrap())
            .school(Some(School::new("Abc Secondary School").unwrap()))
            .level(Some(Level::Sec2))
            .lessons([Lesson::new("tuesday 1000").unwrap(), Lesson::new("monday 1400").unwrap()])
            .build()
    }

    #[test]
    fn same_person_ignores_optional_fields() {
        let original = alice();
        let edited = original.clone().into_builder().school(None).level(None).build();
        assert!(original.is_same_person(&edited));
        assert_ne!(original, edited);
    }

    #[test]
    fn different_phone_is_a_different_person() {
        let original = alice();
        let other = original
            .clone()
            .into_builder()
            .phone(Phone::new("99999999").unwrap())
            .build();
        assert!(!original.is_same_person(&other));
    }

    #[test]
    fn with_level_replaces_only_level() {
        let original = alice();
        let promoted = original.with_level(Some(Level::Sec3));
        assert_eq!(promoted.level(), Some(Level::Sec3));
        assert_eq!(promoted.with_level(Some(Level::Sec2)), original);
    }

    #[test]
    fn earliest_lesson_uses_week_order() {
        assert_eq!(alice().earliest_lesson().unwrap().to_string(), "monday 1400");
    }
}
