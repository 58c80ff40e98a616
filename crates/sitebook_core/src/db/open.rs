//! In-memory store bootstrap.
//!
//! # Invariants
//! - Returned connections enforce foreign keys.
//! - Returned connections are migrated to `latest_version()`.

use super::migrations::{apply_migrations, latest_version};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Opens a fresh, empty in-memory store with the schema applied.
///
/// Every call yields an independent database; nothing is shared between
/// connections and nothing outlives the returned `Connection`.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();

    let opened = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(|mut conn| {
            let applied = bootstrap_connection(&mut conn)?;
            Ok((conn, applied))
        });

    match opened {
        Ok((conn, applied)) => {
            info!(
                "event=db_open module=db status=ok mode=memory schema_version={} migrations_applied={} duration_ms={}",
                latest_version(),
                applied,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<usize> {
    conn.pragma_update(None, "foreign_keys", true)?;
    apply_migrations(conn)
}
