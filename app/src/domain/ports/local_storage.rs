//! Port for the client-side key-value store.
//!
//! The session keeps exactly two entries: `user` (a JSON record) and
//! `visionLevel` (decimal text). Adapters decide where those strings live.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::define_port_error;

define_port_error! {
    /// Errors raised by local storage adapters.
    pub enum LocalStorageError {
        /// The backing store could not be opened.
        Unavailable { location: String, message: String } =>
            "storage at {location} is unavailable: {message}",
        /// The key contains characters the adapter cannot store.
        InvalidKey { key: String } =>
            "storage key `{key}` must use only letters, digits, `-` and `_`",
        /// Reading an entry failed.
        Read { key: String, message: String } =>
            "failed to read `{key}`: {message}",
        /// Writing or removing an entry failed.
        Write { key: String, message: String } =>
            "failed to write `{key}`: {message}",
    }
}

/// String key-value store with browser `localStorage` semantics.
///
/// - `get_item` returns `Ok(None)` for a missing key.
/// - `set_item` replaces any existing value.
/// - `remove_item` on a missing key is not an error.
#[cfg_attr(test, mockall::automock)]
pub trait LocalStorage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError>;

    /// Store `value` under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError>;

    /// Delete the entry for `key`.
    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError>;
}

/// In-memory store for tests and throwaway sessions.
///
/// Entries vanish with the value. Not thread-safe; the application is
/// single-threaded.
#[derive(Debug, Default, Clone)]
pub struct FixtureLocalStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl FixtureLocalStorage {
    /// Store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RefCell::new(map),
        }
    }

    /// Snapshot of the stored keys in order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl LocalStorage for FixtureLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<T: LocalStorage + ?Sized> LocalStorage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        (**self).remove_item(key)
    }
}
