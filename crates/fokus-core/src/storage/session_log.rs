//! SQLite-backed append-only log of completed phases.
//!
//! The timer never reads this store; `recent` exists for the CLI history
//! view.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::session::PhaseLog;
use crate::timer::{Phase, PhaseRecord};

/// SQLite database holding one row per completed phase.
pub struct SessionLog {
    conn: Connection,
}

impl SessionLog {
    /// Open the log at `~/.config/fokus/fokus.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(StorageError::DataDir)?;
        Self::open_at(&dir.join("fokus.db"))
    }

    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self { conn };
        log.migrate()?;
        Ok(log)
    }

    /// Open an in-memory log.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let log = Self {
            conn: Connection::open_in_memory()?,
        };
        log.migrate()?;
        Ok(log)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS phases (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                phase            TEXT NOT NULL,
                description      TEXT NOT NULL DEFAULT '',
                started_at       TEXT NOT NULL,
                ended_at         TEXT NOT NULL,
                duration_secs    REAL NOT NULL,
                session_index    INTEGER NOT NULL,
                long_break_every INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_phases_ended_at ON phases(ended_at);",
        )?;
        Ok(())
    }

    /// Append a completed phase, returning its row id.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record(&self, record: &PhaseRecord) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO phases (phase, description, started_at, ended_at, duration_secs,
                                 session_index, long_break_every)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.phase.as_str(),
                record.description,
                record.started_at.to_rfc3339(),
                record.ended_at.to_rfc3339(),
                record.duration_secs,
                record.session_index,
                record.long_break_every,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent `limit` records, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<PhaseRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT phase, description, started_at, ended_at, duration_secs,
                    session_index, long_break_every
             FROM phases
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            let phase: String = row.get(0)?;
            Ok(PhaseRecord {
                phase: if phase == "break" { Phase::Break } else { Phase::Focus },
                description: row.get(1)?,
                started_at: parse_ts(&row.get::<_, String>(2)?),
                ended_at: parse_ts(&row.get::<_, String>(3)?),
                duration_secs: row.get(4)?,
                session_index: row.get(5)?,
                long_break_every: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl PhaseLog for SessionLog {
    fn append(&mut self, record: &PhaseRecord) -> Result<()> {
        self.record(record)?;
        Ok(())
    }
}

fn parse_ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
