//! Canonical important date store.

use crate::book::unique_list::{StoreResult, UniqueRecordList};
use crate::model::date::ImportantDate;

/// Ordered, deduplicated important dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatesBook {
    dates: UniqueRecordList<ImportantDate>,
}

impl DatesBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dates(dates: Vec<ImportantDate>) -> StoreResult<Self> {
        let mut book = Self::new();
        book.dates.set_all(dates)?;
        Ok(book)
    }

    pub fn reset_data(&mut self, other: &DatesBook) {
        self.dates = other.dates.clone();
    }

    pub fn has_important_date(&self, date: &ImportantDate) -> bool {
        self.dates.contains(date)
    }

    pub fn add_important_date(&mut self, date: ImportantDate) -> StoreResult<()> {
        self.dates.add(date)
    }

    pub fn remove_important_date(&mut self, target: &ImportantDate) -> StoreResult<ImportantDate> {
        self.dates.remove(target)
    }

    pub fn important_dates(&self) -> &[ImportantDate] {
        self.dates.as_slice()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
