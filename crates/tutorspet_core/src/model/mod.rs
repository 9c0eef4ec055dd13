//! Domain model for student records and important dates.
//!
//! # Responsibility
//! - Define self-validating value objects and the aggregates built from them.
//! - Keep identity ("same record") and full-field equality as separate notions.
//!
//! # Invariants
//! - Every value object is validated at construction and immutable afterwards.
//! - A `Person` is identified by `(name, phone)`; an `ImportantDate` by all fields.

pub mod date;
pub mod fields;
pub mod lesson;
pub mod level;
pub mod person;
pub mod predicate;
pub mod validation;
