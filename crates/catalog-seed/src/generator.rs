//! Deterministic demo group generation from seed definitions.
//!
//! The same seed definition always produces identical groups, so demos and
//! screenshots stay reproducible across runs and machines.

use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::LastName;
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{GroupKindSeed, GroupSeed};
use crate::validation::is_valid_group_name;

/// Maximum number of attempts to generate a valid group name.
const MAX_NAME_ATTEMPTS: usize = 100;

const CLUB_CAPACITY: u32 = 50;
const EVENT_CAPACITY: u32 = 500;

/// Generated groups never start more than this full.
const CLUB_MAX_STARTING_MEMBERS: u32 = 40;
const EVENT_MAX_STARTING_MEMBERS: u32 = 400;

/// Events are spread over this many days after [`EVENT_WINDOW_START`].
const EVENT_WINDOW_DAYS: u64 = 180;
const EVENT_WINDOW_START: (i32, u32, u32) = (2024, 7, 1);

const CLUB_ACTIVITIES: &[&str] = &[
    "Walking Club",
    "Chess Circle",
    "Garden Club",
    "Choir",
    "Knitting Circle",
    "Bridge Club",
    "Watercolour Society",
    "Tai Chi Group",
];

const EVENT_THEMES: &[&str] = &[
    "Tea Dance",
    "Craft Fair",
    "History Talk",
    "Picnic",
    "Quiz Night",
    "Health Fair",
];

/// Generates extra clubs and events from a seed definition.
///
/// Clubs are generated first, then events, each numbered after the largest
/// numeric id already present in the registry for that kind. Generated
/// groups are never featured and are credited to `admin`.
///
/// # Errors
///
/// Returns [`GenerationError`] if a valid name cannot be produced or an event
/// date cannot be represented.
///
/// # Example
///
/// ```
/// use catalog_seed::{SeedRegistry, generate_demo_groups};
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "clubCount": 3, "eventCount": 2}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let groups = generate_demo_groups(&registry, seed_def).expect("generated");
///
/// assert_eq!(groups.len(), 5);
/// let again = generate_demo_groups(&registry, seed_def).expect("generated");
/// assert_eq!(groups, again);
/// ```
pub fn generate_demo_groups(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<GroupSeed>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut groups = Vec::with_capacity(seed_def.club_count() + seed_def.event_count());

    let club_ids = allocate_ids(GroupKindSeed::Club, registry.clubs(), seed_def.club_count())?;
    for id in club_ids {
        groups.push(generate_club(&mut rng, id)?);
    }

    let event_ids = allocate_ids(GroupKindSeed::Event, registry.events(), seed_def.event_count())?;
    for id in event_ids {
        groups.push(generate_event(&mut rng, id)?);
    }

    Ok(groups)
}

/// `count` consecutive ids following the largest numeric id in `existing`.
fn allocate_ids(
    kind: GroupKindSeed,
    existing: &[GroupSeed],
    count: usize,
) -> Result<Vec<u64>, GenerationError> {
    let first = existing
        .iter()
        .filter_map(|group| group.id.parse::<u64>().ok())
        .max()
        .map_or(Some(1), |max| max.checked_add(1));
    (0..count)
        .map(|offset| {
            first
                .zip(u64::try_from(offset).ok())
                .and_then(|(first, offset)| first.checked_add(offset))
                .ok_or(GenerationError::IdsExhausted { kind })
        })
        .collect()
}

fn generate_club(rng: &mut ChaCha8Rng, id: u64) -> Result<GroupSeed, GenerationError> {
    let name = generate_name(rng, CLUB_ACTIVITIES)?;
    let description: String = Sentence(EN, 6..12).fake_with_rng(rng);
    let members = rng.random_range(1..=CLUB_MAX_STARTING_MEMBERS);

    Ok(GroupSeed {
        kind: GroupKindSeed::Club,
        id: id.to_string(),
        name,
        description,
        members,
        max_members: CLUB_CAPACITY,
        date: None,
        created_by: "admin".to_owned(),
        featured: false,
    })
}

fn generate_event(rng: &mut ChaCha8Rng, id: u64) -> Result<GroupSeed, GenerationError> {
    let name = generate_name(rng, EVENT_THEMES)?;
    let description: String = Sentence(EN, 6..12).fake_with_rng(rng);
    let members = rng.random_range(1..=EVENT_MAX_STARTING_MEMBERS);
    let date = generate_event_date(rng)?;

    Ok(GroupSeed {
        kind: GroupKindSeed::Event,
        id: id.to_string(),
        name,
        description,
        members,
        max_members: EVENT_CAPACITY,
        date: Some(date),
        created_by: "admin".to_owned(),
        featured: false,
    })
}

/// Builds names such as "Hartley Chess Circle", retrying on invalid output.
fn generate_name(rng: &mut ChaCha8Rng, suffixes: &[&str]) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let surname: String = LastName(EN).fake_with_rng(rng);
        let Some(suffix) = suffixes.choose(rng) else {
            break;
        };
        let candidate = format!("{surname} {suffix}");
        if is_valid_group_name(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_event_date(rng: &mut ChaCha8Rng) -> Result<NaiveDate, GenerationError> {
    let (year, month, day) = EVENT_WINDOW_START;
    let offset = rng.random_range(0..EVENT_WINDOW_DAYS);
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|start| start.checked_add_days(Days::new(offset)))
        .ok_or(GenerationError::DateOutOfRange)
}
