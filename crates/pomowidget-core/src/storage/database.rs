//! SQLite-based runtime state storage.
//!
//! Provides a key-value store used to park the timer state between
//! process invocations.

use rusqlite::{params, Connection};
use std::path::Path;
use tracing::warn;

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::timer::TimerState;

const TIMER_STATE_KEY: &str = "timer_state";

/// SQLite database for runtime state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/pomowidget/pomowidget.db`.
    ///
    /// Creates the database file and schema if they don't exist. An
    /// unreadable file is set aside (see [`open_or_recover`](Self::open_or_recover)).
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or no
    /// database, not even an in-memory one, can be opened.
    pub fn open() -> Result<Self> {
        Self::open_or_recover(&data_dir()?.join("pomowidget.db"))
    }

    /// Open `path`, recovering from a broken file.
    ///
    /// A file that is not a usable database is renamed to `<name>.corrupt`
    /// and a fresh one is created in its place. If that also fails the
    /// session runs on an in-memory database and nothing is parked.
    ///
    /// # Errors
    /// Returns an error only if the in-memory fallback cannot be created.
    pub fn open_or_recover(path: &Path) -> Result<Self> {
        let err = match Self::open_at(path) {
            Ok(db) => return Ok(db),
            Err(e) => e,
        };
        warn!(path = %path.display(), error = %err, "state database unusable, starting fresh");

        let mut aside = path.as_os_str().to_owned();
        aside.push(".corrupt");
        if let Err(e) = std::fs::rename(path, &aside) {
            warn!(error = %e, "cannot move the broken state database aside");
        }
        Self::open_at(path).or_else(|e| {
            warn!(error = %e, "falling back to an in-memory state database");
            Self::open_memory()
        })
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load the parked timer state. Missing, unreadable or corrupt entries
    /// yield `None` so the caller starts fresh.
    pub fn load_timer_state(&self) -> Option<TimerState> {
        let json = match self.kv_get(TIMER_STATE_KEY) {
            Ok(json) => json?,
            Err(e) => {
                warn!(error = %e, "cannot read timer state");
                return None;
            }
        };
        match serde_json::from_str::<TimerState>(&json) {
            Ok(state) => Some(state.sanitized()),
            Err(e) => {
                warn!(error = %e, "corrupt timer state, starting fresh");
                None
            }
        }
    }

    /// # Errors
    /// Returns an error if the state cannot be serialized or written.
    pub fn save_timer_state(&self, state: &TimerState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.kv_set(TIMER_STATE_KEY, &json)?;
        Ok(())
    }

    pub fn clear_timer_state(&self) -> Result<()> {
        self.kv_delete(TIMER_STATE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{ManualClock, TimerEngine, TimerMode, TimerSettings};
    use tempfile::TempDir;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn timer_state_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_timer_state().is_none());

        let mut engine = TimerEngine::with_clock(TimerSettings::default(), ManualClock::default());
        engine.set_mode(TimerMode::LongBreak);
        engine.start();
        db.save_timer_state(engine.state()).unwrap();

        let loaded = db.load_timer_state().unwrap();
        assert_eq!(&loaded, engine.state());

        db.clear_timer_state().unwrap();
        assert!(db.load_timer_state().is_none());
    }

    #[test]
    fn corrupt_timer_state_is_ignored() {
        let db = Database::open_memory().unwrap();
        db.kv_set(TIMER_STATE_KEY, "{not json").unwrap();
        assert!(db.load_timer_state().is_none());
    }

    #[test]
    fn garbage_file_is_set_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pomowidget.db");
        std::fs::write(&path, b"not a database ".repeat(100)).unwrap();
        assert!(Database::open_at(&path).is_err());

        let db = Database::open_or_recover(&path).unwrap();
        assert!(db.load_timer_state().is_none());
        db.kv_set("k", "v").unwrap();
        assert!(dir.path().join("pomowidget.db.corrupt").exists());
        assert_eq!(
            Database::open_at(&path).unwrap().kv_get("k").unwrap().as_deref(),
            Some("v")
        );
    }

    #[test]
    fn file_database_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.db");
        Database::open_at(&path).unwrap().kv_set("k", "v").unwrap();
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v"));
    }
}
