//! Seeded clubs, events and chat greetings for the community catalog.
//!
//! This crate owns the data the application starts from: the featured clubs
//! and events every session begins with, the placeholder chat messages a
//! freshly opened group chat shows, and named demo seeds that expand the
//! catalog with reproducible extra groups. It is deliberately independent of
//! the application's domain types so it can be validated and generated in
//! isolation.
//!
//! # Overview
//!
//! - Loading seed registries from JSON text or files
//! - A built-in registry embedded at compile time
//! - Deterministic demo group generation from named seeds
//! - Group name validation matching the application's constraints
//!
//! # Example
//!
//! ```
//! use catalog_seed::{SeedRegistry, generate_demo_groups};
//!
//! let registry = SeedRegistry::builtin().expect("built-in registry is valid");
//! assert_eq!(registry.clubs().len(), 2);
//!
//! let seed_def = registry.find_seed("quiet-otter").expect("seed exists");
//! let extra = generate_demo_groups(&registry, seed_def).expect("generation succeeds");
//! assert_eq!(extra.len(), 2);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_demo_groups;
pub use registry::{ChatGreetingSeeds, SeedDefinition, SeedRegistry};
pub use seed::{ChatSeed, GroupKindSeed, GroupSeed};
pub use validation::{GROUP_NAME_MAX, is_valid_group_name};
