//! TutorsPet schema, one SQL file per step.
//!
//! - v1 `persons`: one row per student keyed by list position, with
//!   `person_subjects` and `person_lessons` holding the multi-valued fields
//!   and `saved_books` marking which books have ever been written.
//! - v2 `important_dates`: the dates book, also keyed by list position.
//!
//! # Invariants
//! - Steps are listed in strictly increasing `version` order.
//! - `PRAGMA user_version` records the last applied step.
//! - An upgrade runs every pending step in one transaction, so a database
//!   is never left between two versions.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "persons",
        sql: include_str!("0001_persons.sql"),
    },
    SchemaStep {
        version: 2,
        name: "important_dates",
        sql: include_str!("0002_important_dates.sql"),
    },
];

/// Latest schema version known by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

fn pending_steps(current_version: u32) -> impl Iterator<Item = &'static SchemaStep> {
    SCHEMA_STEPS
        .iter()
        .filter(move |step| step.version > current_version)
}

/// Brings the schema on `conn` up to [`latest_version`].
///
/// Fails with `UnsupportedSchemaVersion` for a database written by a newer
/// binary; such a file is left untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }
    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending_steps(current_version) {
        debug!(
            "event=db_migrate_step module=db status=start version={} name={}",
            step.version, step.name
        );
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={latest}"
    );
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_strictly_increasing_from_one() {
        let versions: Vec<u32> = SCHEMA_STEPS.iter().map(|step| step.version).collect();
        let expected: Vec<u32> = (1..=latest_version()).collect();
        assert_eq!(versions, expected);
    }

    #[test]
    fn pending_steps_skip_applied_versions() {
        let names: Vec<&str> = pending_steps(1).map(|step| step.name).collect();
        assert_eq!(names, vec!["important_dates"]);
        assert_eq!(pending_steps(latest_version()).count(), 0);
    }
}
