//! Session membership ledger.

use super::community::{GroupId, GroupKind};

/// Clubs joined and events registered for by the signed-in user.
///
/// The ledger is append-only and does not deduplicate: recording the same
/// group twice stores it twice. Callers that need at-most-once semantics
/// check [`MembershipLedger::contains`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipLedger {
    joined_clubs: Vec<GroupId>,
    registered_events: Vec<GroupId>,
}

impl MembershipLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn list_mut(&mut self, kind: GroupKind) -> &mut Vec<GroupId> {
        match kind {
            GroupKind::Club => &mut self.joined_clubs,
            GroupKind::Event => &mut self.registered_events,
        }
    }

    /// Append `id` to the list for `kind`.
    pub fn record(&mut self, kind: GroupKind, id: GroupId) {
        self.list_mut(kind).push(id);
    }

    /// Whether `id` is present in the list for `kind`.
    pub fn contains(&self, kind: GroupKind, id: &GroupId) -> bool {
        self.entries(kind).contains(id)
    }

    /// Recorded ids for `kind`, oldest first.
    pub fn entries(&self, kind: GroupKind) -> &[GroupId] {
        match kind {
            GroupKind::Club => &self.joined_clubs,
            GroupKind::Event => &self.registered_events,
        }
    }
}
