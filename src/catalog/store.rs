//! Named-record store guarded by a single lock.

use super::model::Record;
use crate::error::{EngineError, Result};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// In-memory map of records keyed by name.
///
/// Every operation takes the lock exactly once, so concurrent CRUD calls
/// are linearizable. Readers get clones, never references into the map.
#[derive(Debug)]
pub struct Store<T: Record> {
    records: RwLock<BTreeMap<String, T>>,
}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Record> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-validated records.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self> {
        let store = Self::new();
        for record in records {
            store.create(record)?;
        }
        Ok(store)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, T>> {
        self.records.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, T>> {
        self.records.write().unwrap_or_else(|p| p.into_inner())
    }

    /// Insert a new record.
    ///
    /// Fails with `Conflict` if the name is taken; the store is unchanged.
    pub fn create(&self, record: T) -> Result<T> {
        record.validate()?;

        let mut records = self.write();
        if records.contains_key(record.name()) {
            return Err(EngineError::conflict(T::KIND, record.name()));
        }
        records.insert(record.name().to_string(), record.clone());
        info!(kind = %T::KIND, name = record.name(), "created");
        Ok(record)
    }

    pub fn get(&self, name: &str) -> Result<T> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::not_found(T::KIND, name))
    }

    /// All records, sorted by name.
    pub fn list(&self) -> Vec<T> {
        self.read().values().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Replace the record stored under `name` wholesale.
    pub fn update(&self, name: &str, record: T) -> Result<T> {
        if record.name() != name {
            return Err(EngineError::Validation(format!(
                "{} name '{}' does not match '{}'",
                T::KIND,
                record.name(),
                name
            )));
        }
        record.validate()?;

        let mut records = self.write();
        match records.get_mut(name) {
            Some(slot) => {
                *slot = record.clone();
                info!(kind = %T::KIND, name, "updated");
                Ok(record)
            }
            None => Err(EngineError::not_found(T::KIND, name)),
        }
    }

    /// Remove and return the record stored under `name`.
    pub fn delete(&self, name: &str) -> Result<T> {
        let removed = self
            .write()
            .remove(name)
            .ok_or_else(|| EngineError::not_found(T::KIND, name))?;
        info!(kind = %T::KIND, name, "deleted");
        Ok(removed)
    }
}
