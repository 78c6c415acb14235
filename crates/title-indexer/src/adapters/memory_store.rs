//! In-memory implementation of the entity store port, for tests and as
//! the reference adapter.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::ports::{EntityStore, StoreError};

/// In-memory [`EntityStore`] backed by nested ordered maps. Kind and id
/// iteration order is deterministic.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    records: BTreeMap<&'static str, BTreeMap<String, Value>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored under a kind.
    pub fn count_of_kind(&self, kind: &'static str) -> usize {
        self.records.get(kind).map(|m| m.len()).unwrap_or(0)
    }
}

impl EntityStore for InMemoryEntityStore {
    fn load_raw(&self, kind: &'static str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.records.get(kind).and_then(|m| m.get(id)).cloned())
    }

    fn save_raw(&mut self, kind: &'static str, id: &str, value: Value) -> Result<(), StoreError> {
        self.records
            .entry(kind)
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    fn ids_of_kind(&self, kind: &'static str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .records
            .get(kind)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default())
    }
}
