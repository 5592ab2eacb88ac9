//! # Storage Module
//!
//! Persists each scenario's ledger so the stock survives page reloads.
//!
//! Two layers:
//!
//! - **Key-value backends** (`KeyValueStore`): plain string storage keyed by
//!   `<scope-prefix>-<scenario-id>`. `MemoryStore` for tests and previews,
//!   `FileStore` for native use, and the browser `localStorage` backend in the
//!   frontend crate.
//! - **Ledger repository** (`LedgerStorage`): encodes the ledger as the JSON
//!   persistence record and treats a corrupt record as absent.
//!
//! Writes overwrite the whole record. There is no cross-tab or multi-writer
//! coordination.

pub mod traits;
pub mod memory_store;
pub mod file_store;
pub mod ledger_repository;

pub use traits::{KeyValueStore, LedgerStorage};
pub use memory_store::MemoryStore;
pub use file_store::FileStore;
pub use ledger_repository::LedgerRepository;
