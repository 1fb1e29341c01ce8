//! Builds the start-up catalog from a seed registry.

use std::path::Path;

use catalog_seed::{
    ChatSeed, GenerationError, GroupKindSeed, GroupSeed, RegistryError, SeedRegistry,
    generate_demo_groups,
};
use thiserror::Error;
use tracing::info;

use crate::domain::{
    Catalog, ChatGreetings, CommunityGroup, DuplicateGroup, Greeting, GroupKind, GroupRecord,
    GroupValidationError,
};

/// Errors raised while turning a seed registry into a catalog.
#[derive(Debug, Error)]
pub enum SeedLoadError {
    /// The registry could not be read or parsed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Demo group generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// A seeded group violates a domain rule.
    #[error("seeded {kind} {id} is invalid: {source}")]
    InvalidGroup {
        /// Kind of the offending group.
        kind: GroupKind,
        /// Id of the offending group.
        id: String,
        /// Validation failure.
        source: GroupValidationError,
    },
    /// A generated group collides with a seeded one.
    #[error(transparent)]
    Duplicate(#[from] DuplicateGroup),
}

/// Catalog and chat placeholders for a new session.
#[derive(Debug, Clone)]
pub struct SeededCatalog {
    /// Clubs and events.
    pub catalog: Catalog,
    /// Placeholder chat messages per kind.
    pub greetings: ChatGreetings,
}

/// Where to read the registry from and which demo seed to expand.
#[derive(Debug, Clone, Default)]
pub struct CatalogSource<'a> {
    /// Registry file; the embedded registry when `None`.
    pub registry_path: Option<&'a Path>,
    /// Named demo seed adding generated groups.
    pub demo_seed: Option<&'a str>,
}

fn kind_of(seed: GroupKindSeed) -> GroupKind {
    match seed {
        GroupKindSeed::Club => GroupKind::Club,
        GroupKindSeed::Event => GroupKind::Event,
    }
}

fn to_group(seed: &GroupSeed) -> Result<CommunityGroup, SeedLoadError> {
    let kind = kind_of(seed.kind);
    CommunityGroup::try_new(GroupRecord {
        kind,
        id: seed.id.clone(),
        name: seed.name.clone(),
        description: seed.description.clone(),
        members: seed.members,
        max_members: seed.max_members,
        date: seed.date,
        created_by: seed.created_by.clone(),
        featured: seed.featured,
    })
    .map_err(|source| SeedLoadError::InvalidGroup {
        kind,
        id: seed.id.clone(),
        source,
    })
}

fn to_greetings(seeds: &[ChatSeed]) -> Vec<Greeting> {
    seeds
        .iter()
        .map(|seed| Greeting::new(seed.author.as_str(), seed.text.as_str()))
        .collect()
}

/// Convert a parsed registry, plus an optional demo seed, into session
/// state.
pub fn seed_catalog(
    registry: &SeedRegistry,
    demo_seed: Option<&str>,
) -> Result<SeededCatalog, SeedLoadError> {
    let mut catalog = Catalog::new();
    for seed in registry.clubs().iter().chain(registry.events()) {
        catalog.insert(to_group(seed)?)?;
    }
    if let Some(name) = demo_seed {
        let definition = registry.find_seed(name)?;
        let generated = generate_demo_groups(registry, definition)?;
        info!(seed = name, groups = generated.len(), "expanded demo seed");
        for seed in &generated {
            catalog.insert(to_group(seed)?)?;
        }
    }
    let chat = registry.chat_greetings();
    let greetings = ChatGreetings::new(to_greetings(&chat.club), to_greetings(&chat.event));
    Ok(SeededCatalog { catalog, greetings })
}

/// Load the registry named by `source` and seed a catalog from it.
pub fn load_catalog(source: &CatalogSource<'_>) -> Result<SeededCatalog, SeedLoadError> {
    let registry = match source.registry_path {
        Some(path) => SeedRegistry::from_file(path)?,
        None => SeedRegistry::builtin()?,
    };
    seed_catalog(&registry, source.demo_seed)
}
