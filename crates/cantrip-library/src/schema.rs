//! Database schema.

use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::LibraryError;

/// Schema version written by this build.
pub const SCHEMA_VERSION: i64 = 1;

/// Table definitions.
const TABLES: &str = "
CREATE TABLE IF NOT EXISTS version (
    version INTEGER PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS tracks (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS albums (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS artists (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS album_contents (
    album_id INTEGER NOT NULL REFERENCES albums(id),
    track_id INTEGER NOT NULL REFERENCES tracks(id),
    track_number INTEGER
);
CREATE TABLE IF NOT EXISTS track_artists (
    track_id INTEGER NOT NULL REFERENCES tracks(id),
    artist_id INTEGER NOT NULL REFERENCES artists(id)
);
CREATE INDEX IF NOT EXISTS album_contents_track ON album_contents(track_id);
CREATE INDEX IF NOT EXISTS track_artists_track ON track_artists(track_id);
";

/// Creates missing tables and checks the stored schema version.
pub fn initialize(conn: &Connection) -> Result<(), LibraryError> {
    conn.execute_batch(TABLES)?;
    let stored: Option<i64> = conn
        .query_row("SELECT version FROM version LIMIT 1", [], |row| row.get(0))
        .optional()?;
    match stored {
        None => {
            debug!("initialising library schema version {SCHEMA_VERSION}");
            conn.execute(
                "INSERT INTO version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
            Ok(())
        }
        Some(found) if found == SCHEMA_VERSION => Ok(()),
        Some(found) => Err(LibraryError::SchemaVersion {
            found,
            expected: SCHEMA_VERSION,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn version_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn.execute("UPDATE version SET version = 99", []).unwrap();
        let err = initialize(&conn).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::SchemaVersion {
                found: 99,
                expected: SCHEMA_VERSION
            }
        ));
    }
}
