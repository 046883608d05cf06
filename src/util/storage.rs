//! Best-effort persistence of the record list and theme preference.
//!
//! SYSTEM CONTEXT
//! ==============
//! The in-memory store is authoritative for the session. This module mirrors
//! it into a key-value byte store (browser `localStorage` under `csr`, a
//! `HashMap` otherwise) and reports failures as values instead of swallowing
//! them, so callers can log and tests can assert.
//!
//! TRADE-OFFS
//! ==========
//! Whole-list writes, no versioning, no transactions. A corrupt or foreign
//! payload on load yields an empty store rather than an error.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::todos::{TodoRecord, TodoState};
use crate::state::ui::Theme;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PersistError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("stored data is invalid: {0}")]
    Invalid(String),
}

/// Minimal string key-value surface shared by browser and in-memory stores.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Session-only fallback store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Browser `localStorage`. Looked up on every call, so the handle itself
/// holds no JS objects.
#[derive(Debug, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    /// Returns a handle only when `localStorage` is reachable right now.
    pub fn open() -> Option<Self> {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .map(|_| Self)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }
}

#[cfg(feature = "csr")]
fn browser_storage() -> Result<web_sys::Storage, PersistError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PersistError::Unavailable)
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        #[cfg(feature = "csr")]
        {
            browser_storage()?
                .get_item(key)
                .map_err(|e| PersistError::Read(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(PersistError::Unavailable)
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        #[cfg(feature = "csr")]
        {
            browser_storage()?
                .set_item(key, value)
                .map_err(|e| PersistError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(PersistError::Unavailable)
        }
    }

    fn backend(&self) -> &'static str {
        "localStorage"
    }
}

/// Pick `localStorage` when persistence is enabled and reachable, otherwise
/// fall back to memory.
pub fn open_store(persist: bool) -> Box<dyn KeyValueStore> {
    if persist {
        if let Some(local) = LocalStorage::open() {
            return Box::new(local);
        }
        log::warn!("localStorage unavailable; tasks will not survive a reload");
    }
    Box::new(MemoryStore::default())
}

/// Load a JSON value stored under `key`. `Ok(None)` means nothing stored.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, PersistError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| PersistError::Decode(e.to_string()))
}

/// Save `value` as JSON under `key`.
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), PersistError> {
    let raw = serde_json::to_string(value).map_err(|e| PersistError::Encode(e.to_string()))?;
    store.set(key, &raw)
}

/// Result of hydrating the record store. `error` is set when the stored
/// payload could not be used and `state` fell back to empty.
#[derive(Debug)]
pub struct LoadOutcome {
    pub state: TodoState,
    pub error: Option<PersistError>,
}

/// Persistence adapter bound to the configured keys.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    storage_key: String,
    theme_key: String,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("backend", &self.store.backend())
            .field("storage_key", &self.storage_key)
            .field("theme_key", &self.theme_key)
            .finish()
    }
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>, storage_key: impl Into<String>, theme_key: impl Into<String>) -> Self {
        Self { store, storage_key: storage_key.into(), theme_key: theme_key.into() }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Read the record list. Never fails: any problem yields an empty store
    /// with the cause attached.
    pub fn load(&self, max_len: usize) -> LoadOutcome {
        let records = match load_json::<Vec<TodoRecord>>(self.store.as_ref(), &self.storage_key) {
            Ok(Some(records)) => records,
            Ok(None) => return LoadOutcome { state: TodoState::default(), error: None },
            Err(err) => {
                log::warn!("failed to load tasks from {}: {err}", self.store.backend());
                return LoadOutcome { state: TodoState::default(), error: Some(err) };
            }
        };
        match TodoState::from_records(records, max_len) {
            Ok(state) => {
                log::info!("loaded {} tasks from {}", state.len(), self.store.backend());
                LoadOutcome { state, error: None }
            }
            Err(err) => {
                log::warn!("discarding stored tasks: {err}");
                LoadOutcome { state: TodoState::default(), error: Some(PersistError::Invalid(err.to_string())) }
            }
        }
    }

    /// Write the full record list.
    pub fn save(&mut self, state: &TodoState) -> Result<(), PersistError> {
        let result = save_json(self.store.as_mut(), &self.storage_key, &state.records());
        if let Err(err) = &result {
            log::warn!("failed to save tasks to {}: {err}", self.store.backend());
        }
        result
    }

    /// Stored theme preference, if any. Unknown strings count as unset.
    pub fn load_theme(&self) -> Option<Theme> {
        match self.store.get(&self.theme_key) {
            Ok(raw) => raw.as_deref().and_then(Theme::parse),
            Err(err) => {
                log::warn!("failed to read theme preference: {err}");
                None
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), PersistError> {
        let result = self.store.set(&self.theme_key, theme.as_str());
        if let Err(err) = &result {
            log::warn!("failed to save theme preference: {err}");
        }
        result
    }
}
