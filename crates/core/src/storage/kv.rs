use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::errors::CoreError;

/// A string key-value store the profile blob is persisted into.
///
/// The browser build backs this with local storage; native builds use
/// [`FileStore`]; tests use [`MemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory (native only).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Use `dir` as the store root, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CoreError::ValidationError(format!(
                "Invalid storage key '{key}': use ASCII letters, digits, '-' or '_'"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
