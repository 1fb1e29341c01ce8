//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod local_storage;

#[cfg(test)]
pub use local_storage::MockLocalStorage;
pub use local_storage::{FixtureLocalStorage, LocalStorage, LocalStorageError};
