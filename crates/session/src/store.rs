//! Credential store implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key under which the opaque authentication token is persisted.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Key under which the JSON-serialized user record is persisted.
pub const USER_KEY: &str = "user";

/// Local key-value store holding the persisted credential record.
///
/// Writes are full-value replaces with last-writer-wins semantics; no
/// transaction discipline is required. Implementations use interior
/// mutability so store handles stay shareable, not because concurrent
/// mutation exists (the session runs on a single logical thread).
pub trait CredentialStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store, primarily for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

/// On-disk snapshot written by [`FileStore`].
#[derive(Debug, Serialize, Deserialize)]
struct FileEnvelope {
    saved_at: DateTime<Utc>,
    entries: HashMap<String, String>,
}

/// JSON-file-backed store at `{data_dir}/opsdesk/session.json`.
///
/// Every write replaces the whole file and refreshes `saved_at`. A missing
/// file reads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::at_path(session_file_path()?))
    }

    /// Open the store at an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> anyhow::Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file at {:?}", self.path))?;
        let envelope: FileEnvelope = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse session file at {:?}", self.path))?;
        Ok(envelope.entries)
    }

    fn write_entries(&self, entries: HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session directory at {:?}", parent))?;
        }
        let envelope = FileEnvelope {
            saved_at: Utc::now(),
            entries,
        };
        let raw = serde_json::to_string_pretty(&envelope)
            .context("failed to serialize session file")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write session file at {:?}", self.path))?;
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            // A corrupt file is replaced rather than kept poisoning writes.
            tracing::warn!("discarding unreadable session file: {err:?}");
            HashMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(entries)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("discarding unreadable session file: {err:?}");
                HashMap::new()
            }
        };
        entries.remove(key);
        self.write_entries(entries)
    }
}

/// Resolve the path to the session file:
/// `{app_data_dir}/opsdesk/session.json`.
fn session_file_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("opsdesk");
    path.push("session.json");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_put_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);

        store.put(AUTH_TOKEN_KEY, "tok-1").unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));

        store.put(AUTH_TOKEN_KEY, "tok-2").unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-2"));

        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("session.json"));
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::at_path(&path);
        store.put(AUTH_TOKEN_KEY, "tok").unwrap();
        store.put(USER_KEY, "{}").unwrap();

        let reopened = FileStore::at_path(&path);
        assert_eq!(reopened.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        assert_eq!(reopened.get(USER_KEY).unwrap().as_deref(), Some("{}"));

        reopened.remove(AUTH_TOKEN_KEY).unwrap();
        let third = FileStore::at_path(&path);
        assert_eq!(third.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(third.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_corrupt_file_errors_on_read_but_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::at_path(&path);
        assert!(store.get(AUTH_TOKEN_KEY).is_err());

        store.put(AUTH_TOKEN_KEY, "fresh").unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn file_store_writes_envelope_with_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::at_path(&path);
        store.put(AUTH_TOKEN_KEY, "tok").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let envelope: FileEnvelope = serde_json::from_str(&raw).unwrap();
        assert!(envelope.entries.contains_key(AUTH_TOKEN_KEY));
        assert!(envelope.saved_at <= Utc::now());
    }
}
