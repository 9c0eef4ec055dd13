//! Canonical record stores.
//!
//! # Responsibility
//! - Own the ordered, deduplicated collections of persons and important dates.
//! - Expose read-only slices for derived views and persistence.
//!
//! # Invariants
//! - No two stored records are "the same" under the record type's `Identity`.
//! - Replacing a record keeps its list position.

pub mod address_book;
pub mod dates_book;
pub mod unique_list;

pub use address_book::AddressBook;
pub use dates_book::DatesBook;
pub use unique_list::{Identity, StoreError, StoreResult, UniqueRecordList};
