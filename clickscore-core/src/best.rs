//! Best-score persistence.
//!
//! The store is a single key holding a decimal string. Reads happen once when
//! a [`BestScore`] is built; afterwards the in-memory value is authoritative and
//! every update is written through on a best-effort basis.

use crate::constants::{BEST_SCORE_KEY, MAX_SCORE};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected write: {0}")]
    Rejected(String),
}

/// Minimal string key-value backend.
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read/update pair injected into the session controller.
pub trait BestScoreStore {
    /// Best score so far, or `None` when never set or the store is unreachable.
    fn read(&self) -> Option<u8>;

    /// Fold `candidate` into the best score and return the new best.
    fn update(&mut self, candidate: u8) -> u8;
}

/// Parse a stored value. Anything that is not a score in range reads as absent.
#[must_use]
pub fn parse_best(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<u8>()
        .ok()
        .filter(|score| *score <= MAX_SCORE)
}

/// Best score cached in memory and written through to a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct BestScore<S> {
    backend: S,
    key: String,
    best: Option<u8>,
}

impl<S: KeyValueStore> BestScore<S> {
    /// Load the persisted best score under the default key.
    pub fn load(backend: S) -> Self {
        Self::load_with_key(backend, BEST_SCORE_KEY)
    }

    pub fn load_with_key(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let best = match backend.get(&key) {
            Ok(raw) => raw.as_deref().and_then(parse_best),
            Err(err) => {
                log::debug!("best score read skipped: {err}");
                None
            }
        };
        Self { backend, key, best }
    }
}

impl<S: KeyValueStore> BestScoreStore for BestScore<S> {
    fn read(&self) -> Option<u8> {
        self.best
    }

    fn update(&mut self, candidate: u8) -> u8 {
        let next = self.best.map_or(candidate, |prior| prior.max(candidate));
        self.best = Some(next);
        if let Err(err) = self.backend.set(&self.key, &next.to_string()) {
            log::debug!("best score write skipped: {err}");
        }
        next
    }
}

/// Shared in-memory backend; clones see the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    offline: Rc<Cell<bool>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the offline switch.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Simulate the backend going away (or coming back).
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.offline.get() {
            return Err(StorageError::Unavailable("memory store offline".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.offline.get() {
            return Err(StorageError::Unavailable("memory store offline".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend that refuses every operation, standing in for blocked storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected("storage disabled".into()))
    }
}
