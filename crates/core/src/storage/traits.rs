//! Storage traits
//!
//! The schedule persists through a single key-value interface, allowing
//! different implementations (SQLite, in-memory).

use crate::error::Result;

/// Key-value persistence operations
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key` (no-op if absent)
    fn remove(&self, key: &str) -> Result<()>;
}

// Blanket implementation: shared references to a store are stores too
impl<T> KeyValueStore for &T
where
    T: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
