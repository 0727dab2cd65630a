//! Key-value persistence
//!
//! Backends:
//! - wasm32: browser LocalStorage
//! - native: one file per key under a data directory
//!
//! Everything stored here is best-effort. Callers log failures and carry on;
//! nothing in the simulation depends on a save succeeding.

use thiserror::Error;

/// Environment variable overriding the native data directory
pub const DATA_DIR_ENV: &str = "EVERGLOW_DATA_DIR";
/// Native data directory used when the environment does not name one
pub const DEFAULT_DATA_DIR: &str = ".everglow";

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage rejected key {key}: {reason}")]
    Rejected { key: String, reason: String },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value store
#[derive(Debug, Clone)]
pub struct Storage {
    #[cfg(not(target_arch = "wasm32"))]
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage {
    /// Storage rooted at `EVERGLOW_DATA_DIR` (or `.everglow`)
    pub fn open() -> Self {
        let root = std::env::var_os(DATA_DIR_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_DATA_DIR));
        Self::at(root)
    }

    /// Storage rooted at an explicit directory
    pub fn at(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the files live in
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<std::path::PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                reason: "keys must be ascii alphanumerics, '_' or '-'".to_string(),
            });
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Read a value, `None` if missing or unreadable
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write a value, replacing any previous one
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;
        // Write through a temp file so a crash never leaves half a value
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Delete a value (missing keys are not an error)
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage {
    /// LocalStorage of the current window
    pub fn open() -> Self {
        Self {}
    }

    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    /// Read a value, `None` if missing or storage is unavailable
    pub fn get(&self, key: &str) -> Option<String> {
        Self::local_storage().ok()?.get_item(key).ok().flatten()
    }

    /// Write a value, replacing any previous one
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    /// Delete a value
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

impl Storage {
    /// Read and decode a JSON value; an undecodable entry is removed
    pub fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Discarding corrupt value for {}: {}", key, e);
                if let Err(e) = self.remove(key) {
                    log::warn!("Failed to remove {}: {}", key, e);
                }
                None
            }
        }
    }

    /// Encode and write a JSON value
    pub fn save_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::test_support::temp_dir;
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let storage = Storage::at(temp_dir("missing"));
        assert_eq!(storage.get("nothing_here"), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = temp_dir("set-get");
        let storage = Storage::at(&dir);
        storage.set("answer", "42").unwrap();
        assert_eq!(storage.get("answer").as_deref(), Some("42"));

        storage.set("answer", "43").unwrap();
        assert_eq!(storage.get("answer").as_deref(), Some("43"));

        storage.remove("answer").unwrap();
        assert_eq!(storage.get("answer"), None);
        // Removing twice is fine
        storage.remove("answer").unwrap();
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = Storage::at(temp_dir("reject"));
        assert!(matches!(
            storage.set("../escape", "1"),
            Err(StorageError::Rejected { .. })
        ));
        assert!(matches!(
            storage.set("", "1"),
            Err(StorageError::Rejected { .. })
        ));
        assert_eq!(storage.get("a/b"), None);
    }

    #[test]
    fn test_corrupt_json_loads_as_none() {
        let dir = temp_dir("corrupt");
        let storage = Storage::at(&dir);
        storage.set("value", "{not json").unwrap();
        assert_eq!(storage.load_json::<u32>("value"), None);
        assert_eq!(storage.get("value"), None);

        storage.save_json("value", &7u32).unwrap();
        assert_eq!(storage.load_json::<u32>("value"), Some(7));
        let _ = std::fs::remove_dir_all(dir);
    }
}
