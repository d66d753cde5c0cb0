//! Session identifier bootstrap and persistence.
//!
//! The backend correlates chat turns through an opaque client-held token.
//! The widget generates one the first time it runs and reuses it unchanged
//! afterwards, persisted under the `chat_session_id` key.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Storage key for the persisted session id.
pub const SESSION_KEY: &str = "chat_session_id";

const ID_PREFIX: &str = "s_";
const ID_LEN: usize = 8;
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque session token, `s_` followed by eight base36 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(ID_PREFIX.len() + ID_LEN);
        id.push_str(ID_PREFIX);
        for _ in 0..ID_LEN {
            let idx = rng.gen_range(0..ID_CHARSET.len());
            id.push(ID_CHARSET[idx] as char);
        }
        Self(id)
    }

    /// Wrap an existing token without validation; the id is opaque to the
    /// server, so whatever was persisted is reused as-is.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read the persisted id, or generate and persist one if absent.
    ///
    /// Runs once at widget startup. A missing or unreadable store counts as
    /// absent; only a failed write surfaces an error.
    pub fn load_or_generate(storage: &dyn SessionStorage) -> Result<Self> {
        if let Some(existing) = storage.load() {
            debug!(session_id = %existing, "Reusing stored session id");
            return Ok(existing);
        }
        let id = Self::generate();
        storage.store(&id)?;
        debug!(session_id = %id, "Generated new session id");
        Ok(id)
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-side key-value persistence for the session id.
///
/// Stands in for the browser's localStorage: `load` is infallible (anything
/// unreadable reads as absent), `store` can fail.
pub trait SessionStorage: Send + Sync {
    /// Read the stored id, if any.
    fn load(&self) -> Option<SessionId>;

    /// Persist the id.
    fn store(&self, id: &SessionId) -> Result<()>;
}

/// File-backed storage: a small JSON object holding the session key.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct StorageFile {
    chat_session_id: String,
}

impl FileSessionStorage {
    /// Create storage backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<SessionId> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let file: StorageFile = serde_json::from_str(&raw).ok()?;
        if file.chat_session_id.is_empty() {
            return None;
        }
        Some(SessionId::from_stored(file.chat_session_id))
    }

    fn store(&self, id: &SessionId) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = StorageFile {
            chat_session_id: id.as_str().to_string(),
        };
        let raw = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    value: Mutex<Option<SessionId>>,
}

impl MemorySessionStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(SessionId::from_stored(id))),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<SessionId> {
        self.value.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    fn store(&self, id: &SessionId) -> Result<()> {
        *self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_id_shape(id: &SessionId) {
        let s = id.as_str();
        assert!(s.starts_with("s_"), "missing prefix: {s}");
        let suffix = &s[2..];
        assert_eq!(suffix.len(), 8, "bad length: {s}");
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()),
            "bad charset: {s}"
        );
    }

    #[test]
    fn generated_id_matches_pattern() {
        for _ in 0..50 {
            assert_id_shape(&SessionId::generate());
        }
    }

    #[test]
    fn bootstrap_creates_and_persists_once() {
        let storage = MemorySessionStorage::new();
        let first = SessionId::load_or_generate(&storage).unwrap();
        assert_id_shape(&first);
        assert_eq!(storage.load(), Some(first.clone()));

        let second = SessionId::load_or_generate(&storage).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bootstrap_reuses_existing_id() {
        let storage = MemorySessionStorage::with_id("s_abc12345");
        let id = SessionId::load_or_generate(&storage).unwrap();
        assert_eq!(id.as_str(), "s_abc12345");
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("state/session.json"));

        assert!(storage.load().is_none());

        let id = SessionId::generate();
        storage.store(&id).unwrap();
        assert_eq!(storage.load(), Some(id));
    }

    #[test]
    fn file_storage_corrupt_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileSessionStorage::new(&path);
        assert!(storage.load().is_none());

        // Bootstrap replaces the corrupt file.
        let id = SessionId::load_or_generate(&storage).unwrap();
        assert_eq!(storage.load(), Some(id));
    }
}
