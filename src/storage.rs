//! Key-value persistence, namespaced by a fixed prefix
//!
//! Values are JSON blobs. On wasm32 the backing store is LocalStorage;
//! when that is unavailable (storage disabled, non-secure context) or on
//! native, everything degrades to an in-memory map so gameplay never
//! depends on persistence working. Reads and writes are best-effort:
//! failures are logged and callers fall back to defaults.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Prefix applied to every key
pub const KEY_PREFIX: &str = "road_rush_";

enum Backend {
    #[cfg(target_arch = "wasm32")]
    Local(web_sys::Storage),
    Memory(RefCell<HashMap<String, String>>),
}

/// Prefix-namespaced JSON store
pub struct Store {
    backend: Backend,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Open LocalStorage when available, otherwise an in-memory map
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        let local = web_sys::window().and_then(|w| match w.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("LocalStorage unavailable: {:?}", err);
                None
            }
        });
        let backend = match local {
            Some(storage) => Backend::Local(storage),
            None => {
                log::warn!("Persistence degraded to in-memory store");
                Backend::Memory(RefCell::new(HashMap::new()))
            }
        };
        Self { backend }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            backend: Backend::Memory(RefCell::new(HashMap::new())),
        }
    }

    /// In-memory store, for tests and headless runs
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(RefCell::new(HashMap::new())),
        }
    }

    fn full_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        let full = Self::full_key(key);
        match &self.backend {
            #[cfg(target_arch = "wasm32")]
            Backend::Local(storage) => storage.get_item(&full).ok().flatten(),
            Backend::Memory(map) => map.borrow().get(&full).cloned(),
        }
    }

    fn write_raw(&self, key: &str, value: String) {
        let full = Self::full_key(key);
        match &self.backend {
            #[cfg(target_arch = "wasm32")]
            Backend::Local(storage) => {
                if let Err(err) = storage.set_item(&full, &value) {
                    log::warn!("Failed to persist {full}: {:?}", err);
                }
            }
            Backend::Memory(map) => {
                map.borrow_mut().insert(full, value);
            }
        }
    }

    /// Load and deserialize a value. Missing or corrupt entries yield
    /// `None` so the caller can fall back to defaults.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.read_raw(key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Corrupt entry for {key}: {err}");
                None
            }
        }
    }

    /// Serialize and store a value, best-effort
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write_raw(key, json),
            Err(err) => log::warn!("Failed to serialize {key}: {err}"),
        }
    }

    /// Remove an entry
    pub fn remove(&self, key: &str) {
        let full = Self::full_key(key);
        match &self.backend {
            #[cfg(target_arch = "wasm32")]
            Backend::Local(storage) => {
                let _ = storage.remove_item(&full);
            }
            Backend::Memory(map) => {
                map.borrow_mut().remove(&full);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        runs: u32,
        best: u64,
    }

    #[test]
    fn test_roundtrip() {
        let store = Store::in_memory();
        let blob = Blob { runs: 3, best: 450 };
        store.set("stats", &blob);
        assert_eq!(store.get::<Blob>("stats"), Some(blob));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = Store::in_memory();
        assert_eq!(store.get::<Blob>("nope"), None);
    }

    #[test]
    fn test_corrupt_entry_falls_back() {
        let store = Store::in_memory();
        store.write_raw("stats", "{not json".to_string());
        assert_eq!(store.get::<Blob>("stats"), None);
    }

    #[test]
    fn test_remove() {
        let store = Store::in_memory();
        store.set("stats", &Blob { runs: 1, best: 10 });
        store.remove("stats");
        assert_eq!(store.get::<Blob>("stats"), None);
    }

    #[test]
    fn test_keys_are_prefixed() {
        assert_eq!(Store::full_key("settings"), "road_rush_settings");
    }
}
