//! Persisted key/value storage behind preference entries.
//!
//! The dispatcher only talks to [`PersistedValueStore`]; hosts plug in the
//! platform store. [`MemoryStore`] and [`JsonFileStore`] cover tests and
//! desktop hosts.

mod json_file;
mod memory;

use serde::{Deserialize, Serialize};

use crate::Result;

pub use json_file::{JsonFileStore, StoreLoadStatus};
pub use memory::MemoryStore;

/// A single value held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Int(i32),
    Text(String),
}

/// Synchronous, last-write-wins key/value store.
pub trait PersistedValueStore {
    /// Read a string, falling back to `default` when the key is missing or
    /// holds a non-string value.
    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String>;

    /// Read an integer, falling back to `default` when the key is missing or
    /// holds a non-integer value.
    fn get_int(&self, key: &str, default: i32) -> i32;

    fn contains(&self, key: &str) -> bool;

    fn set_string(&mut self, key: &str, value: &str) -> Result<()>;

    fn set_int(&mut self, key: &str, value: i32) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}
