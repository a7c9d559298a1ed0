//! Key-value persistence
//!
//! Stores hold JSON strings by key:
//! - `MemoryStore`: in-process, used by tests and headless runs
//! - `FileStore`: a single JSON object on disk (native only)
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)
//!
//! The simulation never sees storage errors: [`load_or`] and [`save`] log
//! failures and fall back to the default or do nothing.

pub mod store;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use store::{KeyValueStore, MemoryStore, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;

/// Read `key` as JSON. Missing, unreadable or corrupt values yield `default`.
pub fn load_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match store.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Corrupt value for {}: {}", key, e);
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            default
        }
    }
}

/// Write `value` as JSON under `key`. Failures are logged and dropped.
pub fn save<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode {}: {}", key, e);
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        log::warn!("Failed to save {}: {}", key, e);
    }
}
