//! Local key-value preference store
//!
//! String keys to string values, persisted as one JSON object. A missing or
//! unreadable file yields an empty store so callers fall back to defaults.

use crate::error::{PrepError, PrepResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!("⚠️ Preference file {} unreadable, starting empty: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        debug!("Loaded {} preferences from {}", values.len(), path.display());

        Self {
            path: Some(path),
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Write the store back to its file; a no-op for in-memory stores
    pub fn save(&self) -> PrepResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| PrepError::Preferences(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/prefs.json");

        let mut store = PreferenceStore::open(&path);
        assert!(store.get("presentation-music-volume").is_none());
        store.set("presentation-music-volume", 0.5);
        store.save().unwrap();

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.get("presentation-music-volume"), Some("0.5"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ nope").unwrap();

        let store = PreferenceStore::open(&path);
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut store = PreferenceStore::in_memory();
        store.set("k", "v");
        assert!(store.save().is_ok());
        assert_eq!(store.get("k"), Some("v"));
    }
}
