//! # Backend Module
//!
//! Everything below the UI shell:
//! - **Config**: the scenario catalog (festivals, segments, quotas)
//! - **Domain**: prize selection, stock ledger, angle mapping, wheel service
//! - **Storage**: ledger persistence over interchangeable key-value backends
//!
//! ```text
//! UI shell (Yew frontend)
//!     ↓
//! Domain (PrizeWheelService)
//!     ↓
//! Storage (LedgerRepository over localStorage / files / memory)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

use log::info;

use crate::backend::config::ScenarioCatalog;
use crate::backend::domain::PrizeWheelService;
use crate::backend::error::WheelResult;
use crate::backend::storage::LedgerStorage;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use storage::*;

/// Loaded configuration shared by every wheel the application opens
#[derive(Debug, Clone)]
pub struct WheelBackend {
    pub catalog: ScenarioCatalog,
}

impl WheelBackend {
    pub fn new(catalog: ScenarioCatalog) -> Self {
        Self { catalog }
    }

    /// Open a scenario's wheel on top of `storage`
    pub fn open_scenario<S: LedgerStorage>(
        &self,
        scenario_id: &str,
        storage: S,
    ) -> WheelResult<PrizeWheelService<S>> {
        PrizeWheelService::open(&self.catalog, scenario_id, storage)
    }

    /// Id of the first configured scenario
    pub fn default_scenario_id(&self) -> Option<&str> {
        self.catalog.scenarios().first().map(|s| s.id.as_str())
    }
}

/// Load the catalog (`PRIZE_WHEEL_CONFIG` or the embedded default)
pub fn initialize_backend() -> WheelResult<WheelBackend> {
    info!("Loading scenario catalog");
    let catalog = ScenarioCatalog::from_env_or_default()?;
    Ok(WheelBackend::new(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_default_scenario() {
        let backend = WheelBackend::new(ScenarioCatalog::embedded().unwrap());
        let scenario_id = backend.default_scenario_id().unwrap().to_string();
        assert_eq!(scenario_id, "summer-festival");

        let service = backend
            .open_scenario(&scenario_id, LedgerRepository::new(MemoryStore::new()))
            .unwrap();
        assert_eq!(service.storage_key(), "prize-wheel-summer-festival");
        assert_eq!(service.available_segments().len(), 8);
    }
}
