//! Local persistence for the cart.
//!
//! The cart is stored as one JSON array under a single key. Reads never
//! fail the caller: a missing or unreadable payload hydrates as an empty
//! cart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::CartError;
use crate::item::CartLineItem;

/// Key-value backend the cart is persisted to.
pub trait CartStorage {
    /// Returns the raw payload stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CartError>;

    /// Replaces the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CartError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidKey`] unless the key is non-empty ASCII
    /// alphanumerics, `-`, or `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CartError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CartError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CartError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CartError> {
        let path = self.path_for(key)?;
        let io_err = |path: &Path, source: std::io::Error| CartError::Io {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }
}

/// In-process storage, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CartError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the persisted cart. Absent, unreadable, or malformed payloads all
/// yield an empty cart.
pub fn load_items<S: CartStorage + ?Sized>(storage: &S, key: &str) -> Vec<CartLineItem> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "cart storage unreadable; starting empty");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "persisted cart is malformed; starting empty");
            Vec::new()
        }
    }
}

/// Writes the full item list under `key`.
///
/// # Errors
///
/// Returns [`CartError`] if serialization or the backend write fails.
pub fn save_items<S: CartStorage + ?Sized>(
    storage: &mut S,
    key: &str,
    items: &[CartLineItem],
) -> Result<(), CartError> {
    let payload = serde_json::to_string(items)?;
    storage.set(key, &payload)
}
