//! Key-value table persistence
//!
//! Stores opaque string values by key, stamped with the time of the last write.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use crate::error::Result;

/// Key-value table accessor
pub struct KeyValueTable<'a> {
    conn: &'a Connection,
}

impl<'a> KeyValueTable<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read a value
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write a value (upserts)
    #[instrument(skip(self, value), fields(bytes = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete a value
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// When the value was last written
    #[instrument(skip(self))]
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let stamp = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| {
                    let raw: String = row.get(0)?;
                    DateTime::parse_from_rfc3339(&raw)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                        })
                },
            )
            .optional()?;
        Ok(stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use tempfile::tempdir;

    #[test]
    fn test_kv_set_get() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        kv.set("timetable-classes", "[]").unwrap();
        assert_eq!(kv.get("timetable-classes").unwrap().as_deref(), Some("[]"));
        assert!(kv.updated_at("timetable-classes").unwrap().is_some());
    }

    #[test]
    fn test_kv_overwrite() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        kv.set("k", "first").unwrap();
        kv.set("k", "second").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_kv_not_found() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        assert!(kv.get("missing").unwrap().is_none());
        assert!(kv.updated_at("missing").unwrap().is_none());
        kv.remove("missing").unwrap();
    }

    #[test]
    fn test_kv_remove() {
        let db = Database::open_in_memory().unwrap();
        let kv = db.kv();

        kv.set("k", "v").unwrap();
        kv.remove("k").unwrap();
        assert!(kv.get("k").unwrap().is_none());
    }

    #[test]
    fn test_kv_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timetable.db");

        {
            let db = Database::open(&path).unwrap();
            db.kv().set("k", "persisted").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.kv().get("k").unwrap().as_deref(), Some("persisted"));
    }
}
