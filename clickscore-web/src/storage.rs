//! `localStorage` backend for the best score.

use crate::dom::{js_error_message, local_storage};
use clickscore_core::{KeyValueStore, StorageError};

/// Browser `window.localStorage`, reached lazily on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorageBackend;

impl KeyValueStore for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage =
            local_storage().map_err(|e| StorageError::Unavailable(js_error_message(&e)))?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage =
            local_storage().map_err(|e| StorageError::Unavailable(js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(js_error_message(&e)))
    }
}
