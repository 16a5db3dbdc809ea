/// Schema setup for the SQLite document store
///
/// Migrations are applied in order and tracked with SQLite's `user_version`
/// pragma. Every document lives in the `kv` table, one row per key.

use rusqlite::Connection;
use crate::storage::StorageError;

/// Schema steps; the schema version is the number applied so far
const MIGRATIONS: &[(&str, &str)] = &[(
    "document table",
    "CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
)];

fn latest_version() -> i64 {
    MIGRATIONS.len() as i64
}

/// Bring the schema up to date
///
/// Refuses to open a database written by a newer build.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    let version = schema_version(conn)?;

    if version > latest_version() {
        return Err(StorageError::Migration(format!(
            "Database schema version {} is newer than this build understands ({})",
            version,
            latest_version()
        )));
    }

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        conn.execute_batch(sql)?;
        conn.pragma_update(None, "user_version", index as i64 + 1)?;
        tracing::info!("Applied migration v{}: {}", index + 1, name);
    }

    Ok(())
}

fn schema_version(conn: &Connection) -> Result<i64, StorageError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_gets_document_table() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_database(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = 'kv'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
        assert_eq!(schema_version(&conn).unwrap(), latest_version());
    }

    #[test]
    fn test_rerun_keeps_documents() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_database(&conn).unwrap();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES ('users', '[]', 'now')",
            [],
        )
        .unwrap();

        initialize_database(&conn).unwrap();

        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0)).unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1).unwrap();

        assert!(matches!(initialize_database(&conn), Err(StorageError::Migration(_))));
    }
}
