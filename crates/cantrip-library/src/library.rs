//! The track library.

use std::{
    fs,
    path::{Path, PathBuf},
};

use cantrip_ql::{Attribute, CompletionSource, Plan, compile_str, escape_like};
use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension, Transaction, params, params_from_iter};

use crate::{
    error::LibraryError,
    schema,
    sql::render,
};

/// A track to add to the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    /// Path to the audio file. Paths inside the music home are stored relative to it.
    pub path: PathBuf,
    /// Track title.
    pub title: String,
    /// Album title, if the track belongs to one.
    pub album: Option<String>,
    /// Position of the track on its album.
    pub track_number: Option<u32>,
    /// Artist names.
    pub artists: Vec<String>,
}

/// Result of [`Library::add_track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The track was inserted with this id.
    Added(i64),
    /// A track with the same path already existed with this id.
    Existing(i64),
}

/// A music library backed by a SQLite database.
#[derive(Debug)]
pub struct Library {
    /// Open database connection.
    conn: Connection,
    /// Directory that stored track paths are relative to.
    music_home: PathBuf,
}

impl Library {
    /// Opens or creates the database at `database`, creating its parent directory
    /// if needed.
    pub fn open(music_home: impl Into<PathBuf>, database: &Path) -> Result<Self, LibraryError> {
        if let Some(parent) = database.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(database).map_err(|source| LibraryError::Open {
            path: database.to_path_buf(),
            source,
        })?;
        debug!("opened library database {}", database.display());
        Self::with_connection(conn, music_home.into())
    }

    /// Creates a library in memory.
    pub fn open_in_memory(music_home: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        Self::with_connection(Connection::open_in_memory()?, music_home.into())
    }

    /// Wraps a connection, initialising the schema.
    fn with_connection(conn: Connection, music_home: PathBuf) -> Result<Self, LibraryError> {
        schema::initialize(&conn)?;
        Ok(Self { conn, music_home })
    }

    /// Returns the music home directory.
    pub fn music_home(&self) -> &Path {
        &self.music_home
    }

    /// Runs a query and returns the matching track paths, resolved against the
    /// music home.
    pub fn select(&self, query: &str) -> Result<Vec<PathBuf>, LibraryError> {
        let plans = compile_str(query)?;
        self.run(&plans)
    }

    /// Runs compiled plans in order and concatenates their results.
    pub fn run(&self, plans: &[Plan]) -> Result<Vec<PathBuf>, LibraryError> {
        let mut paths = Vec::new();
        for plan in plans {
            let statement = render(plan);
            debug!("executing {} with {:?}", statement.sql, statement.params);
            let mut stmt = self.conn.prepare(&statement.sql)?;
            let rows = stmt.query_map(params_from_iter(statement.params.iter()), |row| {
                row.get::<_, String>(0)
            })?;
            for row in rows {
                paths.push(self.music_home.join(row?));
            }
        }
        Ok(paths)
    }

    /// Returns the number of tracks.
    pub fn track_count(&self) -> Result<usize, LibraryError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Adds a track with its album and artists.
    ///
    /// A track whose stored path already exists is left untouched.
    pub fn add_track(&mut self, track: &NewTrack) -> Result<AddOutcome, LibraryError> {
        let stored = self.stored_path(&track.path);
        let tx = self.conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM tracks WHERE path = ?1",
                params![stored],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            warn!("track {stored} is already in the library");
            return Ok(AddOutcome::Existing(id));
        }

        tx.execute(
            "INSERT INTO tracks (title, path) VALUES (?1, ?2)",
            params![track.title, stored],
        )?;
        let track_id = tx.last_insert_rowid();

        if let Some(album) = &track.album {
            let album_id = ensure_album(&tx, album)?;
            tx.execute(
                "INSERT INTO album_contents (album_id, track_id, track_number) VALUES (?1, ?2, ?3)",
                params![album_id, track_id, track.track_number],
            )?;
        }
        for artist in &track.artists {
            let artist_id = ensure_artist(&tx, artist)?;
            tx.execute(
                "INSERT INTO track_artists (track_id, artist_id) VALUES (?1, ?2)",
                params![track_id, artist_id],
            )?;
        }

        tx.commit()?;
        debug!("added track {track_id}: {stored}");
        Ok(AddOutcome::Added(track_id))
    }

    /// Returns the path as stored: relative to the music home when inside it.
    fn stored_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.music_home)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Returns the id of the album with this title, inserting it if needed.
fn ensure_album(tx: &Transaction<'_>, title: &str) -> Result<i64, LibraryError> {
    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM albums WHERE title = ?1",
            params![title],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    tx.execute("INSERT INTO albums (title) VALUES (?1)", params![title])?;
    Ok(tx.last_insert_rowid())
}

/// Returns the id of the artist with this name, inserting it if needed.
fn ensure_artist(tx: &Transaction<'_>, name: &str) -> Result<i64, LibraryError> {
    tx.execute(
        "INSERT OR IGNORE INTO artists (name) VALUES (?1)",
        params![name],
    )?;
    Ok(tx.query_row(
        "SELECT id FROM artists WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?)
}

impl CompletionSource for Library {
    type Error = LibraryError;

    fn values(
        &self,
        attribute: Attribute,
        prefix: Option<&str>,
    ) -> Result<Vec<String>, LibraryError> {
        let (table, column) = match attribute {
            Attribute::Title => ("tracks", "title"),
            Attribute::Album => ("albums", "title"),
            Attribute::Artist => ("artists", "name"),
        };
        let sql = format!("SELECT DISTINCT {column} FROM {table} WHERE {column} LIKE ?1 ESCAPE '\\'");
        let pattern = format!("{}%", escape_like(prefix.unwrap_or_default()));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![pattern], |row| row.get::<_, String>(0))?;
        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use cantrip_ql::completions;

    use super::*;

    fn track(path: &str, title: &str, album: &str, number: u32, artists: &[&str]) -> NewTrack {
        NewTrack {
            path: PathBuf::from(path),
            title: title.to_string(),
            album: Some(album.to_string()),
            track_number: Some(number),
            artists: artists.iter().map(ToString::to_string).collect(),
        }
    }

    fn library() -> Library {
        let mut lib = Library::open_in_memory("/music").unwrap();
        for t in [
            track("x/2.flac", "second", "xylo", 2, &["zed"]),
            track("x/1.flac", "first", "xylo", 1, &["zed"]),
            track("x/3.flac", "third", "xylo", 3, &["zed", "amy"]),
            track("a/1.flac", "aXb", "alpha", 1, &["amy"]),
            track("a/2.flac", "ab", "alpha", 2, &["amy"]),
            track("a/3.flac", "acb", "alpha", 3, &["bob"]),
        ] {
            lib.add_track(&t).unwrap();
        }
        lib
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix("/music")
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    fn select(lib: &Library, query: &str) -> Vec<String> {
        names(&lib.select(query).unwrap())
    }

    #[test]
    fn ordered_album() {
        let lib = library();
        assert_eq!(
            select(&lib, ". on xylo ordered"),
            vec!["x/1.flac", "x/2.flac", "x/3.flac"]
        );
    }

    #[test]
    fn title_rank_then_title() {
        let lib = library();
        assert_eq!(select(&lib, "third, first"), vec!["x/3.flac", "x/1.flac"]);
    }

    #[test]
    fn wildcard_title() {
        let lib = library();
        assert_eq!(select(&lib, "^a.b$"), vec!["a/1.flac", "a/2.flac", "a/3.flac"]);
    }

    #[test]
    fn match_all_title_keeps_other_titles() {
        let lib = library();
        assert_eq!(select(&lib, "first, ."), vec!["x/1.flac"]);
        assert_eq!(select(&lib, ". on alpha").len(), 3);
    }

    #[test]
    fn album_rank_follows_pattern_order() {
        let mut lib = Library::open_in_memory("/music").unwrap();
        lib.add_track(&track("b/x.flac", "x", "banana", 1, &["bob"]))
            .unwrap();
        lib.add_track(&track("a/x.flac", "x", "apple", 1, &["amy"]))
            .unwrap();
        assert_eq!(
            select(&lib, "x on apple, banana"),
            vec!["a/x.flac", "b/x.flac"]
        );
        assert_eq!(
            select(&lib, "x on banana, apple"),
            vec!["b/x.flac", "a/x.flac"]
        );
    }

    #[test]
    fn multi_artist_track_ranks_by_best_artist() {
        for artists in [["b", "a"], ["a", "b"]] {
            let mut lib = Library::open_in_memory("/music").unwrap();
            lib.add_track(&track("t1", "zz", "one", 1, &artists))
                .unwrap();
            lib.add_track(&track("t2", "aa", "two", 1, &["a"]))
                .unwrap();
            assert_eq!(
                select(&lib, ". by b, a"),
                vec!["t1", "t2"],
                "artists inserted as {artists:?}"
            );
        }
    }

    #[test]
    fn artist_filter_deduplicates() {
        let lib = library();
        assert_eq!(select(&lib, "third by zed, amy"), vec!["x/3.flac"]);
    }

    #[test]
    fn and_intersects() {
        let lib = library();
        assert_eq!(select(&lib, ". by amy and . on xylo"), vec!["x/3.flac"]);
    }

    #[test]
    fn or_concatenates() {
        let lib = library();
        assert_eq!(
            select(&lib, "first or ab$"),
            vec!["x/1.flac", "a/2.flac"]
        );
    }

    #[test]
    fn shuffle_same_set() {
        let lib = library();
        let ordered: BTreeSet<String> = select(&lib, ". on alpha").into_iter().collect();
        let shuffled: BTreeSet<String> =
            select(&lib, ". on alpha shuffle").into_iter().collect();
        assert_eq!(ordered, shuffled);
        assert_eq!(shuffled.len(), 3);
    }

    #[test]
    fn parse_error_surfaces() {
        let lib = library();
        assert!(matches!(lib.select("a on"), Err(LibraryError::Query(_))));
    }

    #[test]
    fn duplicate_path_is_existing() {
        let mut lib = library();
        let outcome = lib
            .add_track(&track("/music/x/1.flac", "first", "xylo", 1, &["zed"]))
            .unwrap();
        assert!(matches!(outcome, AddOutcome::Existing(_)));
        assert_eq!(lib.track_count().unwrap(), 6);
    }

    #[test]
    fn shared_album_and_artist_rows() {
        let lib = library();
        assert_eq!(lib.values(Attribute::Album, None).unwrap().len(), 2);
        assert_eq!(lib.values(Attribute::Artist, None).unwrap().len(), 3);
    }

    #[test]
    fn artist_completion() {
        let lib = library();
        assert_eq!(completions(&lib, "by a").unwrap(), vec!["amy"]);
        assert_eq!(completions(&lib, "x on").unwrap(), vec!["alpha", "xylo"]);
        assert_eq!(completions(&lib, "fi").unwrap(), vec!["first"]);
    }

    #[test]
    fn open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("library.db");
        {
            let mut lib = Library::open(dir.path(), &db).unwrap();
            lib.add_track(&track("t.flac", "t", "al", 1, &["ar"])).unwrap();
        }
        let lib = Library::open(dir.path(), &db).unwrap();
        assert_eq!(lib.select("t").unwrap(), vec![dir.path().join("t.flac")]);
    }
}
