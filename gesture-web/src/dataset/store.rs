//! Key-value persistence for recorded samples and saved models
//!
//! The browser build writes to `window.localStorage`; tests and native
//! tooling use the in-memory store.

use std::collections::HashMap;

use crate::error::{GestureError, Result};

/// String store addressed by a fixed key
pub trait KeyValueStore {
    /// Overwrite the value under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// `window.localStorage` wrapper
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| GestureError::Storage("No window found".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| GestureError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| GestureError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| GestureError::Storage(format!("{:?}", e)))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| GestureError::Storage(format!("{:?}", e)))
    }
}
