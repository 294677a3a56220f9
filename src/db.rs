// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.monthwise", "Monthwise", "monthwise"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("monthwise.sqlite"))
}

pub fn open_or_init() -> Result<Store> {
    Store::open(db_path()?)
}

/// Storage failures surface as one of three generic domain errors; callers
/// get no partial-state recovery and are expected to retry or report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch data")]
    Fetch(#[source] rusqlite::Error),
    #[error("failed to save data")]
    Save(#[source] rusqlite::Error),
    #[error("failed to delete data")]
    Delete(#[source] rusqlite::Error),
}

/// Durable string-keyed storage. Every value is a single blob; callers do
/// whole-value read-modify-write, so each logical mutation is one `set`.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Open DB at {}", path.as_ref().display()))?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory DB")?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
            .map_err(StoreError::Fetch)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO kv(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(StoreError::Save)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])
            .map(|_| ())
            .map_err(StoreError::Delete)
    }

    /// All keys starting with `prefix`, in lexicographic order.
    pub fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .map_err(StoreError::Fetch)?;
        let rows = stmt
            .query_map([], |r| r.get::<_, String>(0))
            .map_err(StoreError::Fetch)?;
        let mut out = Vec::new();
        for row in rows {
            let key = row.map_err(StoreError::Fetch)?;
            if key.starts_with(prefix) {
                out.push(key);
            }
        }
        Ok(out)
    }

    pub fn remove_many(&self, keys: &[String]) -> Result<(), StoreError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv", [])
            .map(|_| ())
            .map_err(StoreError::Delete)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn keys_filters_by_prefix_in_order() {
        let store = Store::open_in_memory().unwrap();
        store.set("txns:2024-06", "[]").unwrap();
        store.set("txns:2024-05", "[]").unwrap();
        store.set("budget:2024-05", "100").unwrap();
        assert_eq!(
            store.keys("txns:").unwrap(),
            vec!["txns:2024-05".to_string(), "txns:2024-06".to_string()]
        );
    }

    #[test]
    fn open_on_disk_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.sqlite");
        {
            let store = Store::open(&path).unwrap();
            store.set("k", "v").unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
