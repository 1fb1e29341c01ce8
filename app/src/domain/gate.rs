//! Membership and creation gates.
//!
//! Pure decisions over a user and a group. Callers apply the outcome; the
//! gates never mutate anything.

use std::fmt;

use super::community::CommunityGroup;
use super::user::User;

/// Why a gate refused an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The user is under 18 or has no recorded age.
    Underage,
    /// The group has no places left.
    Full,
}

impl DenialReason {
    /// Stable identifier carried in error details.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Underage => "underage",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The action may proceed.
    Allowed,
    /// The action is refused.
    Denied(DenialReason),
}

impl GateDecision {
    /// Whether the action may proceed.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decide whether `user` may join or register for `group`.
///
/// Age is checked before capacity.
///
/// # Examples
/// ```
/// use senior_spark::domain::{
///     can_join, CommunityGroup, DenialReason, GateDecision, GroupKind, GroupRecord, User,
/// };
///
/// let teen = User::try_from_parts(
///     "3fa85f64-5717-4562-b3fc-2c963f66afa6", "Sam", "sam@example.com", Some(17),
/// ).unwrap();
/// let club = CommunityGroup::try_new(GroupRecord {
///     kind: GroupKind::Club,
///     id: "1".into(),
///     name: "Chess".into(),
///     description: "Games".into(),
///     members: 10,
///     max_members: 50,
///     date: None,
///     created_by: "admin".into(),
///     featured: false,
/// }).unwrap();
/// assert_eq!(can_join(&teen, &club), GateDecision::Denied(DenialReason::Underage));
/// ```
pub fn can_join(user: &User, group: &CommunityGroup) -> GateDecision {
    if !user.is_adult() {
        return GateDecision::Denied(DenialReason::Underage);
    }
    if group.is_full() {
        return GateDecision::Denied(DenialReason::Full);
    }
    GateDecision::Allowed
}

/// Decide whether `user` may create a group.
pub fn can_create(user: &User) -> GateDecision {
    if user.is_adult() {
        GateDecision::Allowed
    } else {
        GateDecision::Denied(DenialReason::Underage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::community::{GroupKind, GroupRecord};
    use rstest::rstest;

    fn user(age: Option<u8>) -> User {
        User::try_from_parts(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "Pat",
            "pat@example.com",
            age,
        )
        .expect("valid user")
    }

    fn group(members: u32, max_members: u32) -> CommunityGroup {
        CommunityGroup::try_new(GroupRecord {
            kind: GroupKind::Event,
            id: "1".into(),
            name: "Fitness Day".into(),
            description: "Stretching".into(),
            members,
            max_members,
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 20),
            created_by: "admin".into(),
            featured: false,
        })
        .expect("valid group")
    }

    #[rstest]
    #[case(Some(17), 10, 50, GateDecision::Denied(DenialReason::Underage))]
    #[case(None, 10, 50, GateDecision::Denied(DenialReason::Underage))]
    #[case(Some(17), 50, 50, GateDecision::Denied(DenialReason::Underage))]
    #[case(Some(90), 500, 500, GateDecision::Denied(DenialReason::Full))]
    #[case(Some(30), 499, 500, GateDecision::Allowed)]
    #[case(Some(18), 0, 50, GateDecision::Allowed)]
    fn join_decisions(
        #[case] age: Option<u8>,
        #[case] members: u32,
        #[case] max_members: u32,
        #[case] expected: GateDecision,
    ) {
        assert_eq!(can_join(&user(age), &group(members, max_members)), expected);
    }

    #[rstest]
    #[case(Some(17), GateDecision::Denied(DenialReason::Underage))]
    #[case(None, GateDecision::Denied(DenialReason::Underage))]
    #[case(Some(18), GateDecision::Allowed)]
    fn create_decisions(#[case] age: Option<u8>, #[case] expected: GateDecision) {
        assert_eq!(can_create(&user(age)), expected);
    }
}
