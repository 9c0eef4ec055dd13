//! Canonical student store.

use crate::book::unique_list::{StoreResult, UniqueRecordList};
use crate::model::person::Person;

/// Ordered, deduplicated student records.
///
/// Duplicate checks here are a last line of defence; callers check
/// `has_person` first to produce user-facing errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    persons: UniqueRecordList<Person>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from `persons`, rejecting same-person duplicates.
    pub fn from_persons(persons: Vec<Person>) -> StoreResult<Self> {
        let mut book = Self::new();
        book.persons.set_all(persons)?;
        Ok(book)
    }

    /// Replaces this book's content with a copy of `other`.
    pub fn reset_data(&mut self, other: &AddressBook) {
        self.persons = other.persons.clone();
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        self.persons.add(person)
    }

    pub fn set_person(&mut self, target: &Person, edited: Person) -> StoreResult<()> {
        self.persons.set(target, edited)
    }

    pub fn remove_person(&mut self, target: &Person) -> StoreResult<Person> {
        self.persons.remove(target)
    }

    /// Replaces every record at once, e.g. after a batch level shift.
    pub fn set_persons(&mut self, persons: Vec<Person>) -> StoreResult<()> {
        self.persons.set_all(persons)
    }

    pub fn persons(&self) -> &[Person] {
        self.persons.as_slice()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
