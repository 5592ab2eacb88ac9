//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on, so the browser,
//! filesystem and in-memory backends are interchangeable.

use anyhow::Result;
use shared::Ledger;

/// Raw string storage, modelled on the browser's `localStorage`
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Drop `key`. Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Ledger persistence keyed by scenario
pub trait LedgerStorage {
    /// Load the ledger for `key`. Absent or unreadable records yield `None`
    fn load(&self, key: &str) -> Result<Option<Ledger>>;

    /// Overwrite the ledger stored for `key`
    fn save(&self, key: &str, ledger: &Ledger) -> Result<()>;

    /// Drop the stored ledger for `key`
    fn remove(&self, key: &str) -> Result<()>;
}
