//! Browser Storage
//!
//! `localStorage` backend for the session cache, plus client settings
//! overrides stored under `boardConfig`.

use std::rc::Rc;

use board_core::{ClientConfig, KeyValueStore, MemoryStore};
use tracing::warn;

/// localStorage key holding a JSON `ClientConfig` override
const CONFIG_KEY: &str = "boardConfig";

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// `None` when the browser denies storage (private mode, sandboxed frames)
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn!("[STORAGE] write {} failed: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn!("[STORAGE] remove {} failed: {:?}", key, e);
        }
    }
}

/// localStorage when available, otherwise a per-tab memory map
pub fn session_backend() -> Rc<dyn KeyValueStore> {
    match BrowserStorage::local() {
        Some(storage) => Rc::new(storage),
        None => {
            warn!("[STORAGE] localStorage unavailable, session will not survive reload");
            Rc::new(MemoryStore::new())
        }
    }
}

/// Stored overrides, then the build-time API origin
pub fn load_config(backend: &dyn KeyValueStore) -> ClientConfig {
    let config = backend
        .get(CONFIG_KEY)
        .and_then(|raw| match serde_json::from_str::<ClientConfig>(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("[STORAGE] ignoring malformed {}: {}", CONFIG_KEY, e);
                None
            }
        })
        .unwrap_or_default();
    config.with_base_url(option_env!("BOARD_API_BASE_URL"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_override() {
        let backend = MemoryStore::new();
        backend.set(CONFIG_KEY, r#"{"pageSize": 25}"#);

        let config = load_config(&backend);
        assert_eq!(config.page_size(), 25);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let backend = MemoryStore::new();
        backend.set(CONFIG_KEY, "not json");

        assert_eq!(load_config(&backend).page_size(), ClientConfig::default().page_size());
    }
}
