//! SQLite persistence gateway
//!
//! [`Database`] owns the one connection the console uses. Every statement is
//! committed on its own; the administrative operations in [`admin`] run as a
//! single transaction each and roll back on error.

pub mod admin;
mod sample;

pub use admin::{NewParty, NewVoter, ResetReport};
pub use sample::{sample_parties, sample_voters};

use evm_core::{Party, PartyId, VoteStore, Voter};
use log::{debug, info};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to open database at {path}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Database connection is not established")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, DbError>;

const CREATE_VOTERS: &str = "CREATE TABLE IF NOT EXISTS voters (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    image_url TEXT,
    has_voted BOOLEAN NOT NULL DEFAULT 0
)";

pub(crate) const CREATE_PARTIES: &str = "CREATE TABLE IF NOT EXISTS parties (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE NOT NULL,
    votes INTEGER NOT NULL DEFAULT 0
)";

const VOTER_COLUMNS: &str = "id, name, image_url, has_voted";

pub struct Database {
    conn: Option<Connection>,
}

impl Database {
    /// Open (creating if needed) the database file and make sure the tables exist.
    pub fn connect(path: &Path) -> Result<Self> {
        info!("Opening database at {}", path.display());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            // A missing parent shows up as an open error below
            let _ = std::fs::create_dir_all(parent);
        }

        let connection_error = |source| DbError::Connection {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connection_error)?;

        conn.busy_timeout(Duration::from_secs(5))
            .map_err(connection_error)?;

        // First real read; fails here if the file is not a database
        conn.execute_batch(CREATE_VOTERS)
            .map_err(connection_error)?;
        conn.execute_batch(CREATE_PARTIES)
            .map_err(connection_error)?;

        let db = Self { conn: Some(conn) };
        debug!("Tables in the database: {:?}", db.table_names()?);
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_VOTERS)?;
        conn.execute_batch(CREATE_PARTIES)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Close the session. Calling it again is a no-op.
    pub fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close() {
                Ok(()) => info!("Database connection closed."),
                Err((_, e)) => log::warn!("Error while closing database: {e}"),
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub(crate) fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(DbError::Disconnected)
    }

    pub(crate) fn conn_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or(DbError::Disconnected)
    }

    /// Run a parameterized read, mapping every row into a typed record
    pub fn query<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    /// Run a parameterized write. Committed immediately; returns rows affected.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self.conn()?.execute(sql, params)?)
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        self.query(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
            [],
            |row| row.get(0),
        )
    }

    fn map_voter(row: &Row<'_>) -> rusqlite::Result<Voter> {
        Ok(Voter {
            id: row.get(0)?,
            name: row.get(1)?,
            image_url: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            has_voted: row.get(3)?,
        })
    }

    fn map_party(row: &Row<'_>) -> rusqlite::Result<Party> {
        Ok(Party {
            id: PartyId(row.get(0)?),
            name: row.get(1)?,
            votes: row.get::<_, i64>(2)?.max(0) as u64,
        })
    }

    /// Every voter, ordered by id
    pub fn all_voters(&self) -> Result<Vec<Voter>> {
        self.query(
            &format!("SELECT {VOTER_COLUMNS} FROM voters ORDER BY id"),
            [],
            Self::map_voter,
        )
    }

    pub fn voter(&self, id: &str) -> Result<Option<Voter>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {VOTER_COLUMNS} FROM voters WHERE id = ?1"),
                params![id],
                Self::map_voter,
            )
            .optional()?)
    }

    /// Voters whose id or name contains `query`, ignoring case
    pub fn search_voters(&self, query: &str) -> Result<Vec<Voter>> {
        // SQLite's LIKE/lower() only fold ASCII, so match in Rust
        Ok(evm_core::search::filter(self.all_voters()?, query))
    }

    pub fn mark_voted(&self, id: &str) -> Result<bool> {
        let changed = self.execute(
            "UPDATE voters SET has_voted = 1 WHERE id = ?1 AND has_voted = 0",
            params![id],
        )?;
        Ok(changed > 0)
    }

    /// All parties, ordered by id
    pub fn parties(&self) -> Result<Vec<Party>> {
        self.query(
            "SELECT id, name, votes FROM parties ORDER BY id",
            [],
            Self::map_party,
        )
    }

    pub fn increment_party(&self, id: PartyId) -> Result<bool> {
        let changed = self.execute(
            "UPDATE parties SET votes = votes + 1 WHERE id = ?1",
            params![id.0],
        )?;
        Ok(changed > 0)
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl VoteStore for Database {
    type Error = DbError;

    fn voter(&self, id: &str) -> Result<Option<Voter>> {
        Database::voter(self, id)
    }

    fn search_voters(&self, query: &str) -> Result<Vec<Voter>> {
        Database::search_voters(self, query)
    }

    fn mark_voted(&mut self, id: &str) -> Result<bool> {
        Database::mark_voted(self, id)
    }

    fn parties(&self) -> Result<Vec<Party>> {
        Database::parties(self)
    }

    fn increment_party(&mut self, id: PartyId) -> Result<bool> {
        Database::increment_party(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_core::{ElectionResult, Outcome, PollingBridge, Selection, SignalMap, SignalSource};
    use std::collections::VecDeque;

    fn seeded() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.populate_voters(&sample_voters()).unwrap();
        db.populate_parties(&sample_parties()).unwrap();
        db
    }

    #[test]
    fn test_connect_creates_voters_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("evm.db");

        let db = Database::connect(&path).unwrap();
        let tables = db.table_names().unwrap();
        assert!(tables.contains(&"voters".to_string()));
        assert!(path.exists());
    }

    #[test]
    fn test_connect_rejects_non_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evm.db");
        std::fs::write(&path, "not a sqlite database\n".repeat(200)).unwrap();

        let err = Database::connect(&path).err().unwrap();
        assert!(matches!(err, DbError::Connection { .. }));
    }

    #[test]
    fn test_disconnect_is_repeatable() {
        let mut db = seeded();
        db.disconnect();
        db.disconnect();
        assert!(!db.is_connected());
        assert!(matches!(db.all_voters(), Err(DbError::Disconnected)));
    }

    #[test]
    fn test_voter_lookup() {
        let db = seeded();
        let voter = db.voter("2").unwrap().unwrap();
        assert_eq!(voter.name, "Rahul Gandhi");
        assert!(!voter.has_voted);
        assert!(db.voter("missing").unwrap().is_none());
    }

    #[test]
    fn test_search_by_substring() {
        let db = seeded();
        let found = db.search_voters("Gandhi").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Rahul Gandhi");

        assert_eq!(db.search_voters("").unwrap().len(), sample_voters().len());
        assert_eq!(db.search_voters(" SRINIVASA ").unwrap()[0].id, "6");
    }

    #[test]
    fn test_mark_voted_writes_once() {
        let db = seeded();
        assert!(db.mark_voted("1").unwrap());
        assert!(!db.mark_voted("1").unwrap());
        assert!(db.voter("1").unwrap().unwrap().has_voted);
        assert!(!db.mark_voted("missing").unwrap());
    }

    #[test]
    fn test_increment_party() {
        let db = seeded();
        for _ in 0..3 {
            assert!(db.increment_party(PartyId(2)).unwrap());
        }
        assert!(!db.increment_party(PartyId(42)).unwrap());

        let votes: Vec<u64> = db.parties().unwrap().iter().map(|p| p.votes).collect();
        assert_eq!(votes, vec![0, 3, 0]);
    }

    #[test]
    fn test_query_error_on_bad_statement() {
        let db = seeded();
        let err = db.execute("UPDATE nowhere SET x = 1", []).unwrap_err();
        assert!(matches!(err, DbError::Query(_)));
    }

    struct Lines(VecDeque<String>);

    impl SignalSource for Lines {
        type Error = std::io::Error;

        fn poll(&mut self) -> std::io::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    #[test]
    fn test_bridge_against_sqlite() {
        let mut db = seeded();
        let lines = ["1", "1", "2", "4", "1"].map(String::from);
        let mut bridge = PollingBridge::new(Lines(lines.into()), SignalMap::default());
        let mut selection = Selection::new();
        selection.select(db.voter("3").unwrap().unwrap());

        for _ in 0..6 {
            bridge.step(&mut db, &mut selection);
        }

        assert!(db.voter("3").unwrap().unwrap().has_voted);
        let result = ElectionResult::from_parties(db.parties().unwrap());
        assert_eq!(result.total_votes, 4);
        assert_eq!(
            result.outcome,
            Outcome::Winner {
                party: "Party 1".to_string(),
                majority: true
            }
        );
    }
}
