//! # Ledger Repository
//!
//! Stores a scenario's ledger as the JSON persistence record:
//!
//! ```json
//! {
//!   "stockManager": { "day": 1, "awardedToday": { "2": 3 }, "awardedTotal": { "2": 9 } },
//!   "day": 1,
//!   "updatedAt": "2026-07-14T18:02:11.512+00:00"
//! }
//! ```
//!
//! A record that does not parse is logged, removed, and reported as absent so
//! the caller starts over with a fresh ledger.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use shared::{Ledger, LedgerRecord};

use super::traits::{KeyValueStore, LedgerStorage};

#[derive(Clone)]
pub struct LedgerRepository<K: KeyValueStore> {
    store: K,
}

impl<K: KeyValueStore> LedgerRepository<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }
}

impl<K: KeyValueStore> LedgerStorage for LedgerRepository<K> {
    fn load(&self, key: &str) -> Result<Option<Ledger>> {
        let raw = match self.store.get(key)? {
            Some(raw) => raw,
            None => {
                debug!("No ledger stored under '{}'", key);
                return Ok(None);
            }
        };

        match serde_json::from_str::<LedgerRecord>(&raw) {
            Ok(record) => {
                if record.day != record.stock_manager.day {
                    warn!(
                        "Ledger '{}' has day {} but stockManager.day {}, using the latter",
                        key, record.day, record.stock_manager.day
                    );
                }
                debug!("Loaded ledger '{}' (day {})", key, record.stock_manager.day);
                Ok(Some(record.into_ledger()))
            }
            Err(e) => {
                warn!("Discarding corrupt ledger '{}': {}", key, e);
                if let Err(remove_error) = self.store.remove(key) {
                    warn!("Could not remove corrupt ledger '{}': {}", key, remove_error);
                }
                Ok(None)
            }
        }
    }

    fn save(&self, key: &str, ledger: &Ledger) -> Result<()> {
        let record = LedgerRecord::new(ledger.clone(), Some(Utc::now().to_rfc3339()));
        let json = serde_json::to_string(&record)?;
        self.store.set(key, &json)?;
        debug!("Saved ledger '{}' (day {})", key, ledger.day);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(key)?;
        info!("Removed stored ledger '{}'", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.day = 2;
        ledger.awarded_today.insert(1, 2);
        ledger.awarded_total.insert(1, 6);
        ledger.awarded_total.insert(3, 1);
        ledger
    }

    #[test]
    fn test_load_missing_is_none() {
        let repository = LedgerRepository::new(MemoryStore::new());
        assert_eq!(repository.load("prize-wheel-fair").unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let repository = LedgerRepository::new(MemoryStore::new());
        let ledger = sample_ledger();

        repository.save("prize-wheel-fair", &ledger).unwrap();
        assert_eq!(repository.load("prize-wheel-fair").unwrap(), Some(ledger));
    }

    #[test]
    fn test_saved_record_layout() {
        let store = MemoryStore::new();
        let repository = LedgerRepository::new(store.clone());
        repository.save("k", &sample_ledger()).unwrap();

        let raw = store.get("k").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["day"], 2);
        assert_eq!(value["stockManager"]["day"], 2);
        assert_eq!(value["stockManager"]["awardedTotal"]["3"], 1);
        assert!(value["updatedAt"].is_string());
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let store = MemoryStore::new();
        store.set("k", "{ not json").unwrap();
        let repository = LedgerRepository::new(store.clone());

        assert_eq!(repository.load("k").unwrap(), None);
        assert!(!store.contains_key("k"));
    }

    #[test]
    fn test_wrong_shape_is_discarded() {
        let store = MemoryStore::new();
        store
            .set("k", r#"{"stockManager": {"day": "one"}, "day": 1}"#)
            .unwrap();
        let repository = LedgerRepository::new(store.clone());

        assert_eq!(repository.load("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_legacy_record_without_timestamp() {
        let store = MemoryStore::new();
        store
            .set(
                "k",
                r#"{"stockManager": {"day": 1, "awardedToday": {"2": 1}, "awardedTotal": {"2": 1}}, "day": 1}"#,
            )
            .unwrap();
        let repository = LedgerRepository::new(store);

        let ledger = repository.load("k").unwrap().unwrap();
        assert_eq!(ledger.awarded_today(2), 1);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        let repository = LedgerRepository::new(store.clone());
        repository.save("k", &sample_ledger()).unwrap();
        repository.remove("k").unwrap();
        assert_eq!(repository.load("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_backend() {
        let temp_dir = TempDir::new().unwrap();
        let repository = LedgerRepository::new(FileStore::new(temp_dir.path()).unwrap());
        let ledger = sample_ledger();

        repository.save("prize-wheel-fair", &ledger).unwrap();
        let reopened = LedgerRepository::new(FileStore::new(temp_dir.path()).unwrap());
        assert_eq!(reopened.load("prize-wheel-fair").unwrap(), Some(ledger));
    }
}
