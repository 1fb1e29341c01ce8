//! In-memory collections of clubs and events.

use super::community::{CommunityGroup, GroupId, GroupKind};

/// Clubs and events available during the session, in insertion order.
///
/// Ids are unique within a kind; the two kinds have separate id spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    clubs: Vec<CommunityGroup>,
    events: Vec<CommunityGroup>,
}

/// Error returned when inserting a group whose id is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Collection of the clashing group.
    pub kind: GroupKind,
    /// Clashing id.
    pub id: GroupId,
}

impl std::fmt::Display for DuplicateGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} already exists", self.kind, self.id)
    }
}

impl std::error::Error for DuplicateGroup {}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: GroupKind) -> &Vec<CommunityGroup> {
        match kind {
            GroupKind::Club => &self.clubs,
            GroupKind::Event => &self.events,
        }
    }

    fn list_mut(&mut self, kind: GroupKind) -> &mut Vec<CommunityGroup> {
        match kind {
            GroupKind::Club => &mut self.clubs,
            GroupKind::Event => &mut self.events,
        }
    }

    /// All groups of a kind.
    pub fn groups(&self, kind: GroupKind) -> &[CommunityGroup] {
        self.list(kind)
    }

    /// Featured groups of a kind.
    pub fn featured(&self, kind: GroupKind) -> impl Iterator<Item = &CommunityGroup> {
        self.list(kind).iter().filter(|group| group.is_featured())
    }

    /// Look up a group by kind and id.
    pub fn find(&self, kind: GroupKind, id: &GroupId) -> Option<&CommunityGroup> {
        self.list(kind).iter().find(|group| group.id() == id)
    }

    /// Mutable lookup by kind and id.
    pub fn find_mut(&mut self, kind: GroupKind, id: &GroupId) -> Option<&mut CommunityGroup> {
        self.list_mut(kind).iter_mut().find(|group| group.id() == id)
    }

    /// Id for the next created group: one past the largest numeric id of
    /// the kind, or `1` when there is none. `None` once `u64::MAX` is taken.
    pub fn next_id(&self, kind: GroupKind) -> Option<GroupId> {
        self.list(kind)
            .iter()
            .filter_map(|group| group.id().numeric())
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
            .map(GroupId::from_number)
    }

    /// Append a group to its kind's collection.
    pub fn insert(&mut self, group: CommunityGroup) -> Result<(), DuplicateGroup> {
        if self.find(group.kind(), group.id()).is_some() {
            return Err(DuplicateGroup {
                kind: group.kind(),
                id: group.id().clone(),
            });
        }
        self.list_mut(group.kind()).push(group);
        Ok(())
    }

    /// Total number of groups across both kinds.
    pub fn len(&self) -> usize {
        self.clubs.len() + self.events.len()
    }

    /// Whether the catalog holds no groups.
    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty() && self.events.is_empty()
    }
}
