//! Local key-value preference storage.
//!
//! Each key maps to an ordered set of strings. Writes replace the whole
//! set for a key; there is no incremental update.

#[cfg(test)]
use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};

use crate::domain::{AppError, Result};

/// Storage of string sets under named keys.
pub trait PreferenceStore {
    /// Reads the values stored under `key`, or `None` if the key was never written.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get_string_set(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replaces the values stored under `key`.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn put_string_set(&mut self, key: &str, values: &[String]) -> Result<()>;
}

/// `SQLite`-backed preference store.
pub struct SqlitePreferences {
    conn: Connection,
}

impl SqlitePreferences {
    /// Opens or creates the preferences database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(AppError::database)?;

        tracing::debug!(path = %path.display(), "Opened preferences database");

        Self::with_connection(conn)
    }

    /// Opens a throwaway in-memory database.
    ///
    /// # Errors
    /// Returns error if schema creation fails.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::database)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let storage = Self { conn };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            -- Keys that have been written, even if their set is empty
            CREATE TABLE IF NOT EXISTS preference_keys (
                key TEXT PRIMARY KEY
            );

            -- String set members, in insertion order
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT NOT NULL REFERENCES preference_keys(key) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (key, position)
            );
            ",
            )
            .map_err(AppError::database)?;

        Ok(())
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get_string_set(&self, key: &str) -> Result<Option<Vec<String>>> {
        let known: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM preference_keys WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .map_err(AppError::database)?;

        if known == 0 {
            return Ok(None);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT value FROM preferences WHERE key = ?1 ORDER BY position ASC")
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map([key], |row| row.get::<_, String>(0))
            .map_err(AppError::database)?;

        let mut values = Vec::new();
        for row in rows {
            match row {
                Ok(value) => values.push(value),
                Err(e) => {
                    tracing::warn!("Failed to read preference row: {}", e);
                }
            }
        }

        tracing::debug!("Read {} values under '{}'", values.len(), key);

        Ok(Some(values))
    }

    fn put_string_set(&mut self, key: &str, values: &[String]) -> Result<()> {
        let tx = self.conn.transaction().map_err(AppError::database)?;

        tx.execute("INSERT OR IGNORE INTO preference_keys (key) VALUES (?1)", [key])
            .map_err(AppError::database)?;
        tx.execute("DELETE FROM preferences WHERE key = ?1", [key])
            .map_err(AppError::database)?;

        {
            let mut stmt = tx
                .prepare("INSERT INTO preferences (key, position, value) VALUES (?1, ?2, ?3)")
                .map_err(AppError::database)?;
            for (position, value) in values.iter().enumerate() {
                stmt.execute(params![key, position as i64, value])
                    .map_err(AppError::database)?;
            }
        }

        tx.commit().map_err(AppError::database)?;

        tracing::debug!("Wrote {} values under '{}'", values.len(), key);

        Ok(())
    }
}

/// In-process preference store with no persistence.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    sets: HashMap<String, Vec<String>>,
}

#[cfg(test)]
impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferences {
    fn get_string_set(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.sets.get(key).cloned())
    }

    fn put_string_set(&mut self, key: &str, values: &[String]) -> Result<()> {
        self.sets.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = SqlitePreferences::open_in_memory().unwrap();
        assert_eq!(storage.get_string_set("Exercises").unwrap(), None);
    }

    #[test]
    fn test_put_replaces_and_keeps_order() {
        let mut storage = SqlitePreferences::open_in_memory().unwrap();

        storage
            .put_string_set("Exercises", &strings(&["b", "a", "c"]))
            .unwrap();
        storage
            .put_string_set("Exercises", &strings(&["z", "y"]))
            .unwrap();

        assert_eq!(
            storage.get_string_set("Exercises").unwrap(),
            Some(strings(&["z", "y"]))
        );
    }

    #[test]
    fn test_empty_set_is_distinct_from_missing() {
        let mut storage = SqlitePreferences::open_in_memory().unwrap();

        storage.put_string_set("Exercises", &[]).unwrap();

        assert_eq!(storage.get_string_set("Exercises").unwrap(), Some(vec![]));
        assert_eq!(storage.get_string_set("Other").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("preferences.db");

        {
            let mut storage = SqlitePreferences::open(&db_path).unwrap();
            storage
                .put_string_set("Exercises", &strings(&["Plank, CALORIES, 30"]))
                .unwrap();
        }

        let storage = SqlitePreferences::open(&db_path).unwrap();
        assert_eq!(
            storage.get_string_set("Exercises").unwrap(),
            Some(strings(&["Plank, CALORIES, 30"]))
        );
    }

    #[test]
    fn test_memory_preferences() {
        let mut storage = MemoryPreferences::new();
        assert_eq!(storage.get_string_set("k").unwrap(), None);

        storage.put_string_set("k", &strings(&["v"])).unwrap();
        assert_eq!(storage.get_string_set("k").unwrap(), Some(strings(&["v"])));
    }
}
