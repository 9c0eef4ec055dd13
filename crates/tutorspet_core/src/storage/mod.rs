//! Persistence boundary for address and dates books.
//!
//! # Responsibility
//! - Save and reload whole books, preserving list order.
//! - Reject persisted rows that fail value-object validation.

use crate::book::{AddressBook, DatesBook, StoreError};
use crate::db::DbError;
use crate::model::validation::ValidationError;
use thiserror::Error;

mod sqlite;

pub use sqlite::SqliteBookStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("invalid persisted data: {0}")]
    Validation(#[from] ValidationError),
    #[error("persisted records are inconsistent: {0}")]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-book load/save contract.
///
/// Loads return `Ok(None)` when the book was never saved.
pub trait BookStorage {
    fn load_address_book(&self) -> StorageResult<Option<AddressBook>>;
    fn save_address_book(&mut self, book: &AddressBook) -> StorageResult<()>;
    fn load_dates_book(&self) -> StorageResult<Option<DatesBook>>;
    fn save_dates_book(&mut self, book: &DatesBook) -> StorageResult<()>;
}
