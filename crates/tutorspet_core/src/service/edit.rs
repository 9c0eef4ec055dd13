//! Partial update descriptor for student records.
//!
//! # Invariants
//! - An unset field always retains the existing value; there is no "clear".
//! - `apply_to` is pure: it never touches stores or indexes.

use crate::model::fields::{Address, Email, Name, Phone, School, Subject};
use crate::model::lesson::Lesson;
use crate::model::level::Level;
use crate::model::person::Person;
use std::collections::BTreeSet;

/// Fields to overwrite on an existing student. `None` means "keep".
///
/// `subjects` and `lessons` replace the whole set when present; an empty set
/// therefore removes every subject or lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub school: Option<School>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub guardian_name: Option<Name>,
    pub guardian_phone: Option<Phone>,
    pub level: Option<Level>,
    pub subjects: Option<BTreeSet<Subject>>,
    pub lessons: Option<BTreeSet<Lesson>>,
}

impl EditPersonDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if at least one field is set.
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.school.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.guardian_name.is_some()
            || self.guardian_phone.is_some()
            || self.level.is_some()
            || self.subjects.is_some()
            || self.lessons.is_some()
    }

    /// Merges this descriptor onto `person`, returning the edited record.
    pub fn apply_to(&self, person: &Person) -> Person {
        let mut builder = person.clone().into_builder();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(phone) = &self.phone {
            builder = builder.phone(phone.clone());
        }
        if let Some(school) = &self.school {
            builder = builder.school(Some(school.clone()));
        }
        if let Some(email) = &self.email {
            builder = builder.email(Some(email.clone()));
        }
        if let Some(address) = &self.address {
            builder = builder.address(Some(address.clone()));
        }
        if let Some(guardian_name) = &self.guardian_name {
            builder = builder.guardian_name(Some(guardian_name.clone()));
        }
        if let Some(guardian_phone) = &self.guardian_phone {
            builder = builder.guardian_phone(Some(guardian_phone.clone()));
        }
        if let Some(level) = self.level {
            builder = builder.level(Some(level));
        }
        if let Some(subjects) = &self.subjects {
            builder = builder.subjects(subjects.iter().cloned());
        }
        if let Some(lessons) = &self.lessons {
            builder = builder.lessons(lessons.iter().copied());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::EditPersonDescriptor;
    use crate::model::fields::{Address, Name, Phone, Subject};
    use crate::model::lesson::Lesson;
    use crate::model::level::Level;
    use crate::model::person::Person;
    use std::collections::BTreeSet;

    fn student() -> Person {
        Person::builder(Name::new("Amy Bee").unwrap(), Phone::new("85355255").unwrap())
            .address(Some(Address::new("123, Jurong West Ave 6").unwrap()))
            .level(Some(Level::Sec1))
            .subjects([Subject::new("math").unwrap()])
            .lessons([Lesson::new("monday 1400").unwrap()])
            .build()
    }

    #[test]
    fn empty_descriptor_edits_nothing() {
        let descriptor = EditPersonDescriptor::new();
        assert!(!descriptor.is_any_field_edited());
        assert_eq!(descriptor.apply_to(&student()), student());
    }

    #[test]
    fn unset_fields_are_retained() {
        let descriptor = EditPersonDescriptor {
            phone: Some(Phone::new("90000000").unwrap()),
            ..EditPersonDescriptor::default()
        };
        let edited = descriptor.apply_to(&student());
        assert_eq!(edited.phone().as_str(), "90000000");
        assert_eq!(edited.name(), student().name());
        assert_eq!(edited.address(), student().address());
        assert_eq!(edited.subjects(), student().subjects());
        assert_eq!(edited.lessons(), student().lessons());
        assert_eq!(edited.level(), Some(Level::Sec1));
    }

    #[test]
    fn set_fields_replace_whole_collections() {
        let descriptor = EditPersonDescriptor {
            subjects: Some(BTreeSet::new()),
            lessons: Some([Lesson::new("friday 1000").unwrap()].into_iter().collect()),
            ..EditPersonDescriptor::default()
        };
        let edited = descriptor.apply_to(&student());
        assert!(edited.subjects().is_empty());
        assert_eq!(edited.lessons().len(), 1);
        assert_eq!(edited.lessons().first().unwrap().to_string(), "friday 1000");
    }
}
