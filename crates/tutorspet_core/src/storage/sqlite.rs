//! SQLite-backed book storage.
//!
//! # Invariants
//! - A save replaces every row of that book in one transaction.
//! - `position` columns reproduce list order on load.
//! - Loaded values go through the same constructors as user input.

use super::{BookStorage, StorageError, StorageResult};
use crate::book::{AddressBook, DatesBook};
use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::date::{Description, Details, ImportantDate};
use crate::model::fields::{Address, Email, Name, Phone, School, Subject};
use crate::model::lesson::Lesson;
use crate::model::level::Level;
use crate::model::person::Person;
use crate::model::validation::ValidationError;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

const ADDRESS_BOOK: &str = "address_book";
const DATES_BOOK: &str = "dates_book";

const PERSON_SELECT_SQL: &str = "SELECT
    position,
    name,
    phone,
    school,
    email,
    address,
    guardian_name,
    guardian_phone,
    level
FROM persons
ORDER BY position ASC;";

/// Book storage over a migrated connection.
pub struct SqliteBookStorage<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookStorage<'conn> {
    /// Wraps a connection opened through `db::open_db`.
    ///
    /// # Errors
    /// - `DbError::UnsupportedSchemaVersion` when the schema is not current.
    pub fn try_new(conn: &'conn mut Connection) -> StorageResult<Self> {
        let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if version != latest_version() {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: version,
                latest_supported: latest_version(),
            }
            .into());
        }
        Ok(Self { conn })
    }

    fn is_saved(&self, book: &str) -> StorageResult<bool> {
        let saved = self
            .conn
            .query_row(
                "SELECT 1 FROM saved_books WHERE book = ?1;",
                [book],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(saved.is_some())
    }
}

impl BookStorage for SqliteBookStorage<'_> {
    fn load_address_book(&self) -> StorageResult<Option<AddressBook>> {
        if !self.is_saved(ADDRESS_BOOK)? {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(PERSON_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            let position: i64 = row.get("position")?;
            let builder = Person::builder(
                Name::new(row.get::<_, String>("name")?)?,
                Phone::new(row.get::<_, String>("phone")?)?,
            )
            .school(optional(row.get("school")?, School::new)?)
            .email(optional(row.get("email")?, Email::new)?)
            .address(optional(row.get("address")?, Address::new)?)
            .guardian_name(optional(row.get("guardian_name")?, Name::new)?)
            .guardian_phone(optional(row.get("guardian_phone")?, Phone::new)?)
            .level(optional(row.get("level")?, Level::new)?)
            .subjects(load_values(
                self.conn,
                "SELECT subject FROM person_subjects WHERE person_position = ?1;",
                position,
                Subject::new,
            )?)
            .lessons(load_values(
                self.conn,
                "SELECT lesson FROM person_lessons WHERE person_position = ?1;",
                position,
                Lesson::new,
            )?);
            persons.push(builder.build());
        }

        let book = AddressBook::from_persons(persons)?;
        info!(
            "event=storage_load module=storage status=ok book={ADDRESS_BOOK} records={}",
            book.len()
        );
        Ok(Some(book))
    }

    fn save_address_book(&mut self, book: &AddressBook) -> StorageResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM person_subjects;", [])?;
        tx.execute("DELETE FROM person_lessons;", [])?;
        tx.execute("DELETE FROM persons;", [])?;

        for (position, person) in book.persons().iter().enumerate() {
            let position = to_position(position)?;
            tx.execute(
                "INSERT INTO persons (
                    position,
                    name,
                    phone,
                    school,
                    email,
                    address,
                    guardian_name,
                    guardian_phone,
                    level
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    position,
                    person.name().as_str(),
                    person.phone().as_str(),
                    person.school().map(|value| value.as_str()),
                    person.email().map(|value| value.as_str()),
                    person.address().map(|value| value.as_str()),
                    person.guardian_name().map(|value| value.as_str()),
                    person.guardian_phone().map(|value| value.as_str()),
                    person.level().map(Level::as_str),
                ],
            )?;
            for subject in person.subjects() {
                tx.execute(
                    "INSERT INTO person_subjects (person_position, subject) VALUES (?1, ?2);",
                    params![position, subject.as_str()],
                )?;
            }
            for lesson in person.lessons() {
                tx.execute(
                    "INSERT INTO person_lessons (person_position, lesson) VALUES (?1, ?2);",
                    params![position, lesson.to_string()],
                )?;
            }
        }

        mark_saved(&tx, ADDRESS_BOOK)?;
        tx.commit()?;
        info!(
            "event=storage_save module=storage status=ok book={ADDRESS_BOOK} records={}",
            book.len()
        );
        Ok(())
    }

    fn load_dates_book(&self) -> StorageResult<Option<DatesBook>> {
        if !self.is_saved(DATES_BOOK)? {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(
            "SELECT description, details FROM important_dates ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut dates = Vec::new();
        while let Some(row) = rows.next()? {
            dates.push(ImportantDate::new(
                Description::new(row.get::<_, String>("description")?)?,
                Details::new(row.get::<_, String>("details")?)?,
            ));
        }

        let book = DatesBook::from_dates(dates)?;
        info!(
            "event=storage_load module=storage status=ok book={DATES_BOOK} records={}",
            book.len()
        );
        Ok(Some(book))
    }

    fn save_dates_book(&mut self, book: &DatesBook) -> StorageResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM important_dates;", [])?;
        for (position, date) in book.important_dates().iter().enumerate() {
            tx.execute(
                "INSERT INTO important_dates (position, description, details)
                 VALUES (?1, ?2, ?3);",
                params![
                    to_position(position)?,
                    date.description.as_str(),
                    date.details.to_string(),
                ],
            )?;
        }
        mark_saved(&tx, DATES_BOOK)?;
        tx.commit()?;
        info!(
            "event=storage_save module=storage status=ok book={DATES_BOOK} records={}",
            book.len()
        );
        Ok(())
    }
}

fn mark_saved(tx: &Transaction<'_>, book: &str) -> StorageResult<()> {
    tx.execute(
        "INSERT INTO saved_books (book, saved_at) VALUES (?1, datetime('now'))
         ON CONFLICT(book) DO UPDATE SET saved_at = excluded.saved_at;",
        [book],
    )?;
    Ok(())
}

fn to_position(index: usize) -> StorageResult<i64> {
    i64::try_from(index)
        .map_err(|_| StorageError::InvalidData(format!("list position {index} overflows i64")))
}

fn optional<T, E>(
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Result<Option<T>, E> {
    value.map(parse).transpose()
}

fn load_values<T>(
    conn: &Connection,
    sql: &str,
    position: i64,
    parse: impl Fn(String) -> Result<T, ValidationError>,
) -> StorageResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([position])?;
    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        values.push(parse(row.get::<_, String>(0)?)?);
    }
    Ok(values)
}
