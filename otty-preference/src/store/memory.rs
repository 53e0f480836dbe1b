use std::collections::BTreeMap;

use super::{PersistedValueStore, StoredValue};
use crate::Result;

/// In-process store backed by an ordered map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_values(values: BTreeMap<String, StoredValue>) -> Self {
        Self { values }
    }

    pub(crate) fn values(&self) -> &BTreeMap<String, StoredValue> {
        &self.values
    }

    /// Put `key` back to an earlier state; `None` removes it.
    pub(crate) fn restore(&mut self, key: &str, previous: Option<StoredValue>) {
        match previous {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            },
            None => {
                self.values.remove(key);
            },
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PersistedValueStore for MemoryStore {
    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        match self.values.get(key) {
            Some(StoredValue::Text(value)) => Some(value.clone()),
            Some(StoredValue::Int(_)) => {
                log::warn!("preference [{key}] holds an integer, not a string");
                default.map(ToString::to_string)
            },
            None => default.map(ToString::to_string),
        }
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.values.get(key) {
            Some(StoredValue::Int(value)) => *value,
            Some(StoredValue::Text(_)) => {
                log::warn!("preference [{key}] holds a string, not an integer");
                default
            },
            None => default,
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), StoredValue::Text(value.to_string()));
        Ok(())
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.values.insert(key.to_string(), StoredValue::Int(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
