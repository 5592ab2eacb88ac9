//! # File Store
//!
//! Native key-value backend: one JSON file per key in a base directory.
//!
//! ```text
//! <data dir>/prize-wheel/
//! ├── prize-wheel-summer-festival.json
//! └── prize-wheel-harvest-fair.json
//! ```
//!
//! Writes go to a temp file first and are renamed into place.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Directory name used under the platform data directory
    pub const DEFAULT_DIRECTORY: &'static str = "prize-wheel";

    /// Create a store rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating store directory {}", base_path.display()))?;
            info!("Created store directory {}", base_path.display());
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Store under the platform's local data directory
    pub fn new_default() -> Result<Self> {
        Self::in_data_dir(dirs::data_local_dir())
    }

    fn in_data_dir(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir =
            data_dir.ok_or_else(|| anyhow!("could not determine the local data directory"))?;
        Self::new(data_dir.join(Self::DEFAULT_DIRECTORY))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// File backing `key`; characters outside `[A-Za-z0-9._-]` become `_`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_directory.join(format!("{}.json", file_stem))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("No stored value for '{}' at {}", key, path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, &path).with_context(|| format!("replacing {}", path.display()))?;
        debug!("Stored '{}' at {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
            debug!("Removed '{}' from {}", key, path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip_and_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        assert_eq!(store.get("prize-wheel-fair").unwrap(), None);
        store.set("prize-wheel-fair", "{\"a\":1}").unwrap();
        store.set("prize-wheel-fair", "{\"a\":2}").unwrap();
        assert_eq!(
            store.get("prize-wheel-fair").unwrap(),
            Some("{\"a\":2}".to_string())
        );
        assert!(!store.path_for("prize-wheel-fair").with_extension("tmp").exists());

        store.remove("prize-wheel-fair").unwrap();
        assert_eq!(store.get("prize-wheel-fair").unwrap(), None);
        store.remove("prize-wheel-fair").unwrap();
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileStore::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base_directory(), nested.as_path());
    }

    #[test]
    fn test_store_in_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::in_data_dir(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(
            store.base_directory(),
            temp_dir.path().join(FileStore::DEFAULT_DIRECTORY).as_path()
        );
        assert!(store.base_directory().is_dir());

        assert!(FileStore::in_data_dir(None).is_err());
    }

    #[test]
    fn test_new_default_uses_prize_wheel_directory() {
        if let Ok(store) = FileStore::new_default() {
            assert!(store.base_directory().ends_with(FileStore::DEFAULT_DIRECTORY));
        }
    }

    #[test]
    fn test_path_sanitizes_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        let path = store.path_for("../escape/key");
        assert_eq!(path.file_name().unwrap(), ".._escape_key.json");
        assert_eq!(path.parent().unwrap(), temp_dir.path());
    }
}
