//! Seed record types.
//!
//! These types mirror the application's community groups without depending
//! on them; the application converts them into domain records at start-up.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which catalog list a seeded group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKindSeed {
    /// A standing club (capacity 50).
    Club,
    /// A dated event (capacity 500).
    Event,
}

impl GroupKindSeed {
    /// Lowercase label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Club => "club",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for GroupKindSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seeded club or event.
///
/// # Example
///
/// ```
/// use catalog_seed::{GroupKindSeed, GroupSeed};
///
/// let group = GroupSeed {
///     kind: GroupKindSeed::Club,
///     id: "1".to_owned(),
///     name: "Morning Walkers Club".to_owned(),
///     description: "Walks in the park".to_owned(),
///     members: 23,
///     max_members: 50,
///     date: None,
///     created_by: "admin".to_owned(),
///     featured: true,
/// };
///
/// assert!(group.members <= group.max_members);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSeed {
    /// Catalog list the group belongs to.
    pub kind: GroupKindSeed,
    /// Identifier, unique within its kind.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current member or attendee count.
    pub members: u32,
    /// Capacity.
    pub max_members: u32,
    /// Calendar date, events only.
    pub date: Option<NaiveDate>,
    /// Creator identifier (`admin` for built-in groups).
    pub created_by: String,
    /// Whether the home view highlights the group.
    pub featured: bool,
}

/// A placeholder chat message shown when a group chat is first opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSeed {
    /// Author display name.
    pub author: String,
    /// Message text.
    pub text: String,
}
