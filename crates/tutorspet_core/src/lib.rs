//! Core record model for TutorsPet, a private tutor's student book.
//! This crate owns every business invariant; front-ends only issue commands.

pub mod book;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod sample;
pub mod schedule;
pub mod service;
pub mod storage;
pub mod view;

pub use book::{AddressBook, DatesBook, StoreError};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date::{Description, Details, ImportantDate};
pub use model::fields::{Address, Email, Name, Phone, School, Subject};
pub use model::lesson::Lesson;
pub use model::level::{Level, LevelError};
pub use model::person::{Person, PersonBuilder, PersonKey};
pub use model::validation::ValidationError;
pub use schedule::lesson_index::{LessonConflict, LessonIndex, LessonSlot};
pub use service::edit::EditPersonDescriptor;
pub use service::level_policy::{LevelDirection, LevelShiftOutcome};
pub use service::model_manager::{ModelError, ModelManager, ModelResult};
pub use storage::{BookStorage, SqliteBookStorage, StorageError, StorageResult};

/// Minimal health-check API for front-end integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
