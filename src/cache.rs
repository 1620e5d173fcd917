//! In-memory store of the last status seen for each game key.
//!
//! Entries are whole `Arc<GameStatus>` values swapped under a write lock, so a
//! reader gets either the previous or the new status, never a mix.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::model::GameStatus;

#[derive(Debug, Default)]
pub struct StatusCache {
    entries: RwLock<HashMap<String, Arc<GameStatus>>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry under `status.key`.
    pub fn save(&self, status: GameStatus) {
        let key = status.key.clone();
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key, Arc::new(status));
    }

    pub fn get(&self, key: &str) -> Option<Arc<GameStatus>> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
