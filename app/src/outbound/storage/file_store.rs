//! Directory-backed local storage: one file per key.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use crate::domain::ports::{LocalStorage, LocalStorageError};

use super::atomic_io::write_atomic;

/// Stores each entry as a UTF-8 file named after its key.
///
/// Keys are limited to ASCII letters, digits, `-` and `_` so they can never
/// escape the directory.
#[derive(Debug)]
pub struct FileLocalStorage {
    root: Utf8PathBuf,
    dir: Dir,
}

fn check_key(key: &str) -> Result<(), LocalStorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(LocalStorageError::invalid_key(key))
    }
}

impl FileLocalStorage {
    /// Open `root`, creating it if needed.
    pub fn open(root: &Utf8Path) -> Result<Self, LocalStorageError> {
        let unavailable =
            |err: io::Error| LocalStorageError::unavailable(root.as_str(), err.to_string());
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(unavailable)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(unavailable)?;
        debug!(root = %root, "opened storage directory");
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl LocalStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        check_key(key)?;
        match self.dir.read_to_string(key) {
            Ok(value) => {
                debug!(key, bytes = value.len(), "read storage entry");
                Ok(Some(value))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(LocalStorageError::read(key, err.to_string())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        check_key(key)?;
        write_atomic(&self.dir, key, value)
            .map_err(|err| LocalStorageError::write(key, err.to_string()))?;
        debug!(key, bytes = value.len(), "wrote storage entry");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        check_key(key)?;
        match self.dir.remove_file(key) {
            Ok(()) => {
                debug!(key, "removed storage entry");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(LocalStorageError::write(key, err.to_string())),
        }
    }
}
