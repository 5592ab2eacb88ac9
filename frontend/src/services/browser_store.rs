use anyhow::{anyhow, Result};
use prize_wheel_engine::backend::storage::KeyValueStore;
use web_sys::Storage;

/// `KeyValueStore` over the browser's `localStorage`
#[derive(Clone)]
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    /// Open `window.localStorage`. Fails when storage is disabled (e.g. some
    /// private browsing modes).
    pub fn local() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow!("localStorage access denied: {:?}", e))?
            .ok_or_else(|| anyhow!("localStorage is not available"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow!("reading '{}' from localStorage failed: {:?}", key, e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow!("writing '{}' to localStorage failed: {:?}", key, e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| anyhow!("removing '{}' from localStorage failed: {:?}", key, e))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_roundtrip() {
        let store = BrowserStore::local().unwrap();
        let key = "prize-wheel-test-key";

        store.set(key, "{\"day\":1}").unwrap();
        assert_eq!(store.get(key).unwrap().as_deref(), Some("{\"day\":1}"));

        store.remove(key).unwrap();
        assert_eq!(store.get(key).unwrap(), None);
    }
}
