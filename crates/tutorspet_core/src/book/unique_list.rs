//! Ordered list that rejects records considered "the same".

use crate::model::date::ImportantDate;
use crate::model::person::Person;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store contract violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Another stored record is the same as the incoming one.
    #[error("record already exists")]
    Duplicate,
    /// Target record is not stored.
    #[error("record not found")]
    NotFound,
}

/// Pluggable sameness used for duplicate detection.
///
/// Distinct from `PartialEq`, which compares every field.
pub trait Identity {
    fn is_same(&self, other: &Self) -> bool;
}

impl Identity for Person {
    fn is_same(&self, other: &Self) -> bool {
        self.is_same_person(other)
    }
}

impl Identity for ImportantDate {
    fn is_same(&self, other: &Self) -> bool {
        self.is_same_important_date(other)
    }
}

/// Ordered collection without same-record duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueRecordList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueRecordList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identity + PartialEq + Clone> UniqueRecordList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a record the same as `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|stored| stored.is_same(item))
    }

    /// Position of the stored record equal (all fields) to `item`.
    pub fn find(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|stored| stored == item)
    }

    /// Appends `item`.
    pub fn add(&mut self, item: T) -> StoreResult<()> {
        if self.contains(&item) {
            return Err(StoreError::Duplicate);
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces `target` with `edited` at the same position.
    ///
    /// `edited` may be the same record as `target` (an in-place edit) but not
    /// the same as any other stored record.
    pub fn set(&mut self, target: &T, edited: T) -> StoreResult<()> {
        let position = self.find(target).ok_or(StoreError::NotFound)?;
        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(index, stored)| index != position && stored.is_same(&edited));
        if collides {
            return Err(StoreError::Duplicate);
        }
        self.items[position] = edited;
        Ok(())
    }

    /// Removes the stored record equal (all fields) to `target`.
    pub fn remove(&mut self, target: &T) -> StoreResult<T> {
        let position = self.find(target).ok_or(StoreError::NotFound)?;
        Ok(self.items.remove(position))
    }

    /// Replaces the whole content; rejects input with internal duplicates.
    pub fn set_all(&mut self, items: Vec<T>) -> StoreResult<()> {
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|earlier| earlier.is_same(item)) {
                return Err(StoreError::Duplicate);
            }
        }
        self.items = items;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Identity, StoreError, UniqueRecordList};

    /// Same when the key matches; full equality also compares the payload.
    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        key: u8,
        payload: &'static str,
    }

    impl Identity for Entry {
        fn is_same(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    fn entry(key: u8, payload: &'static str) -> Entry {
        Entry { key, payload }
    }

    #[test]
    fn add_contains_remove() {
        let mut list = UniqueRecordList::new();
        list.add(entry(1, "a")).unwrap();
        assert!(list.contains(&entry(1, "different payload")));
        list.remove(&entry(1, "a")).unwrap();
        assert!(!list.contains(&entry(1, "a")));
        assert!(list.is_empty());
    }

    #[test]
    fn add_rejects_same_record() {
        let mut list = UniqueRecordList::new();
        list.add(entry(1, "a")).unwrap();
        assert_eq!(list.add(entry(1, "b")), Err(StoreError::Duplicate));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_requires_exact_record() {
        let mut list = UniqueRecordList::new();
        list.add(entry(1, "a")).unwrap();
        assert_eq!(list.remove(&entry(1, "b")), Err(StoreError::NotFound));
    }

    #[test]
    fn set_keeps_position_and_rejects_collisions() {
        let mut list = UniqueRecordList::new();
        list.add(entry(1, "a")).unwrap();
        list.add(entry(2, "b")).unwrap();
        list.add(entry(3, "c")).unwrap();

        list.set(&entry(2, "b"), entry(2, "edited")).unwrap();
        assert_eq!(list.as_slice()[1], entry(2, "edited"));

        assert_eq!(list.set(&entry(2, "edited"), entry(3, "x")), Err(StoreError::Duplicate));
        assert_eq!(list.set(&entry(9, "missing"), entry(9, "x")), Err(StoreError::NotFound));
        assert_eq!(list.as_slice()[1], entry(2, "edited"));
    }

    #[test]
    fn set_all_rejects_internal_duplicates() {
        let mut list = UniqueRecordList::new();
        list.add(entry(1, "a")).unwrap();
        let err = list.set_all(vec![entry(5, "x"), entry(5, "y")]).unwrap_err();
        assert_eq!(err, StoreError::Duplicate);
        assert_eq!(list.as_slice(), &[entry(1, "a")]);
    }
}
