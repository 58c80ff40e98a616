use rusqlite::Connection;
use sitebook_core::db::migrations::latest_version;
use sitebook_core::db::{open_db_in_memory, DbError};
use sitebook_core::{RepoError, SqliteProjectRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "projects");
    assert_table_exists(&conn, "tasks");
    assert_table_exists(&conn, "comments");
    assert_table_exists(&conn, "attachments");
}

#[test]
fn open_db_in_memory_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn each_in_memory_store_is_independent() {
    let first = open_db_in_memory().unwrap();
    first
        .execute_batch(
            "INSERT INTO projects (id, name, description, start_date, end_date, status, budget, progress)
             VALUES ('p1', 'Depot', '', 738886, 738917, 'planning', 0, 0);",
        )
        .unwrap();

    let second = open_db_in_memory().unwrap();
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteProjectRepository::try_new(&conn).err().unwrap();
    match err {
        RepoError::Db(DbError::SchemaNotReady {
            db_version,
            expected,
        }) => {
            assert_eq!(db_version, 0);
            assert_eq!(expected, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
