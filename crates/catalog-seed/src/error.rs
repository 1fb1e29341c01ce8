//! Error types for the catalog-seed crate.
//!
//! Registry parsing and demo generation each have their own enum so callers
//! can tell a broken registry file apart from a generation failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::seed::GroupKindSeed;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A group has a blank identifier.
    #[error("{kind} at index {index} has a blank id")]
    BlankGroupId {
        /// Kind of the offending group.
        kind: GroupKindSeed,
        /// Position of the group in its list.
        index: usize,
    },

    /// Two groups of the same kind share an identifier.
    #[error("duplicate {kind} id '{id}'")]
    DuplicateGroupId {
        /// Kind of the offending group.
        kind: GroupKindSeed,
        /// The repeated identifier.
        id: String,
    },

    /// A group name is blank or too long.
    #[error("{kind} '{id}' has an invalid name")]
    InvalidGroupName {
        /// Kind of the offending group.
        kind: GroupKindSeed,
        /// Identifier of the offending group.
        id: String,
    },

    /// A group declares more members than its capacity allows.
    #[error("{kind} '{id}' has {members} members but room for {max_members}")]
    OverCapacity {
        /// Kind of the offending group.
        kind: GroupKindSeed,
        /// Identifier of the offending group.
        id: String,
        /// Declared member count.
        members: u32,
        /// Declared capacity.
        max_members: u32,
    },

    /// An event is missing its date.
    #[error("event '{id}' has no date")]
    MissingEventDate {
        /// Identifier of the offending event.
        id: String,
    },

    /// A club carries a date, which only events may have.
    #[error("club '{id}' must not have a date")]
    UnexpectedClubDate {
        /// Identifier of the offending club.
        id: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during demo group generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid group name after maximum retries.
    #[error("failed to generate valid group name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// A generated event date fell outside the representable calendar.
    #[error("generated event date is out of range")]
    DateOutOfRange,

    /// The registry already uses the largest numeric id of a kind.
    #[error("no {kind} ids are left for generated groups")]
    IdsExhausted {
        /// Kind whose id space is used up.
        kind: GroupKindSeed,
    },
}
