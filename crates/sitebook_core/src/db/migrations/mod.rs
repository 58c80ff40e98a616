//! Schema migrations for the project store.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - Each migration and its `PRAGMA user_version` bump commit together.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version a fully migrated store reports.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to `latest_version()`.
///
/// Returns the number of migrations applied; zero when already current.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version);
    let mut applied = 0;
    for migration in pending {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;

        debug!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
        applied += 1;
    }
    Ok(applied)
}

pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, current_user_version, latest_version};
    use rusqlite::Connection;

    #[test]
    fn second_run_applies_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(apply_migrations(&mut conn).unwrap(), latest_version() as usize);
        assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
        assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    }

    #[test]
    fn newer_schema_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();
        assert!(apply_migrations(&mut conn).is_err());
    }
}
