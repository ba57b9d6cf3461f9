//! Credential providers
//!
//! The client never reads ambient storage itself: it is handed a
//! [`CredentialProvider`] at construction and asks it for the bearer token on
//! every authenticated call. Callers that persist the token after login use a
//! [`TokenStore`].

use crate::error::{ApiError, ApiResult};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;

/// Key under which the credential is persisted
pub const TOKEN_KEY: &str = "token";

/// Source of the bearer token attached to authenticated requests
pub trait CredentialProvider: Send + Sync {
    /// Current token, if one is present
    fn token(&self) -> Option<String>;
}

/// A credential provider that can also be written, after login or logout
pub trait TokenStore: CredentialProvider {
    /// Persist a new token
    fn store(&self, token: &str) -> ApiResult<()>;

    /// Remove the stored token
    fn clear(&self) -> ApiResult<()>;
}

/// A fixed token, or none at all for unauthenticated use
#[derive(Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Provider that always returns `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Provider without a credential
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken")
            .field(&self.0.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// In-process token store
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialProvider for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn store(&self, token: &str) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::config("token store lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::config("token store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Token persisted in a JSON key-value file
///
/// The file holds a flat object; the credential lives under [`TOKEN_KEY`] and
/// any other keys are left untouched on write.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory (`<data dir>/tradepost/storage.json`)
    pub fn default_location() -> ApiResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ApiError::config("could not determine a data directory"))?;
        Ok(Self::new(dir.join("tradepost").join("storage.json")))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> ApiResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(ApiError::config(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl CredentialProvider for FileTokenStore {
    fn token(&self) -> Option<String> {
        match self.read_entries() {
            Ok(entries) => entries
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read credential file");
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn store(&self, token: &str) -> ApiResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)
    }

    fn clear(&self) -> ApiResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").token(), Some("abc".to_string()));
        assert_eq!(StaticToken::none().token(), None);
        assert!(!format!("{:?}", StaticToken::new("abc")).contains("abc"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.token().is_none());

        store.store("t1").unwrap();
        assert_eq!(store.token().as_deref(), Some("t1"));

        store.clear().unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_file_store_missing_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("storage.json"));
        assert!(store.token().is_none());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileTokenStore::new(&path).store("persisted").unwrap();
        assert_eq!(FileTokenStore::new(&path).token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_file_store_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme": "dark", "token": "old"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.store("new").unwrap();
        store.clear().unwrap();

        let entries: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries.get("theme"), Some(&Value::String("dark".to_string())));
        assert!(!entries.contains_key(TOKEN_KEY));
    }

    #[test]
    fn test_file_store_corrupt_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.token().is_none());
        assert!(store.store("t").is_err());
    }
}
