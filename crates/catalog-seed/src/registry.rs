//! Seed registry types and JSON parsing.
//!
//! The registry holds the groups every session starts with, the placeholder
//! chat messages per group kind, and named demo seeds. It is loaded from JSON
//! and validated as a whole so the application never sees a half-valid
//! catalog.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{ChatSeed, GroupKindSeed, GroupSeed};
use crate::validation::is_valid_group_name;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry compiled into the crate.
const BUILTIN_REGISTRY: &str = include_str!("../data/builtin.json");

/// Creator recorded for seeded groups that do not name one.
const DEFAULT_CREATOR: &str = "admin";

/// A validated seed registry.
///
/// # Example
///
/// ```
/// use catalog_seed::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "clubs": [{"id": "1", "name": "Chess Circle", "description": "Weekly games",
///                "members": 4, "maxMembers": 50}],
///     "events": [],
///     "seeds": [{"name": "test", "seed": 42, "clubCount": 2, "eventCount": 1}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.clubs().len(), 1);
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    clubs: Vec<GroupSeed>,
    events: Vec<GroupSeed>,
    chat_greetings: ChatGreetingSeeds,
    seeds: Vec<SeedDefinition>,
}

/// Placeholder chat messages per group kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatGreetingSeeds {
    /// Messages shown in a newly opened club chat.
    #[serde(default)]
    pub club: Vec<ChatSeed>,
    /// Messages shown in a newly opened event chat.
    #[serde(default)]
    pub event: Vec<ChatSeed>,
}

impl SeedRegistry {
    /// Parses the registry embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] only if the embedded data has been edited
    /// into an invalid state.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_REGISTRY)
    }

    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or a date is not `YYYY-MM-DD`
    /// - The version is unsupported
    /// - A group id is blank or repeated within its kind
    /// - A group name is invalid
    /// - A group has more members than capacity
    /// - An event lacks a date or a club has one
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let clubs = validate_groups(GroupKindSeed::Club, raw.clubs)?;
        let events = validate_groups(GroupKindSeed::Event, raw.events)?;

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                club_count: s.club_count,
                event_count: s.event_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            clubs,
            events,
            chat_greetings: raw.chat_greetings,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the seeded clubs in registry order.
    #[must_use]
    pub fn clubs(&self) -> &[GroupSeed] {
        &self.clubs
    }

    /// Returns the seeded events in registry order.
    #[must_use]
    pub fn events(&self) -> &[GroupSeed] {
        &self.events
    }

    /// Returns the seeded groups of one kind.
    #[must_use]
    pub fn groups(&self, kind: GroupKindSeed) -> &[GroupSeed] {
        match kind {
            GroupKindSeed::Club => &self.clubs,
            GroupKindSeed::Event => &self.events,
        }
    }

    /// Returns the placeholder chat messages.
    #[must_use]
    pub const fn chat_greetings(&self) -> &ChatGreetingSeeds {
        &self.chat_greetings
    }

    /// Returns all demo seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a demo seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn validate_groups(
    kind: GroupKindSeed,
    raw_groups: Vec<RawGroupSeed>,
) -> Result<Vec<GroupSeed>, RegistryError> {
    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(raw_groups.len());

    for (index, raw) in raw_groups.into_iter().enumerate() {
        if raw.id.trim().is_empty() {
            return Err(RegistryError::BlankGroupId { kind, index });
        }
        if !seen.insert(raw.id.clone()) {
            return Err(RegistryError::DuplicateGroupId { kind, id: raw.id });
        }
        if !is_valid_group_name(&raw.name) {
            return Err(RegistryError::InvalidGroupName { kind, id: raw.id });
        }
        if raw.members > raw.max_members {
            return Err(RegistryError::OverCapacity {
                kind,
                id: raw.id,
                members: raw.members,
                max_members: raw.max_members,
            });
        }
        match (kind, raw.date.is_some()) {
            (GroupKindSeed::Event, false) => {
                return Err(RegistryError::MissingEventDate { id: raw.id });
            }
            (GroupKindSeed::Club, true) => {
                return Err(RegistryError::UnexpectedClubDate { id: raw.id });
            }
            _ => {}
        }

        groups.push(GroupSeed {
            kind,
            id: raw.id,
            name: raw.name,
            description: raw.description,
            members: raw.members,
            max_members: raw.max_members,
            date: raw.date,
            created_by: raw
                .created_by
                .unwrap_or_else(|| DEFAULT_CREATOR.to_owned()),
            featured: raw.featured,
        });
    }

    Ok(groups)
}

/// A named seed definition for deterministic demo generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    club_count: usize,
    event_count: usize,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of extra clubs to generate.
    #[must_use]
    pub const fn club_count(&self) -> usize {
        self.club_count
    }

    /// Returns the number of extra events to generate.
    #[must_use]
    pub const fn event_count(&self) -> usize {
        self.event_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    #[serde(default)]
    clubs: Vec<RawGroupSeed>,
    #[serde(default)]
    events: Vec<RawGroupSeed>,
    #[serde(default)]
    chat_greetings: ChatGreetingSeeds,
    #[serde(default)]
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroupSeed {
    id: String,
    name: String,
    description: String,
    members: u32,
    max_members: u32,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    created_by: Option<String>,
    #[serde(default)]
    featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    #[serde(default)]
    club_count: usize,
    #[serde(default)]
    event_count: usize,
}
