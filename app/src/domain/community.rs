//! Community groups: clubs and events.
//!
//! Clubs and events share one record shape. Events additionally carry a
//! calendar date, and each kind has its own fixed capacity.

use std::fmt;
use std::str::FromStr;

use catalog_seed::{GROUP_NAME_MAX, is_valid_group_name};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which collection a group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// A recurring club with up to 50 members.
    Club,
    /// A dated event with up to 500 attendees.
    Event,
}

impl GroupKind {
    /// Fixed capacity for newly created groups of this kind.
    pub fn max_members(self) -> u32 {
        match self {
            Self::Club => 50,
            Self::Event => 500,
        }
    }

    /// Singular noun, lower case.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Club => "club",
            Self::Event => "event",
        }
    }

    /// Singular noun, title case.
    pub fn title(self) -> &'static str {
        match self {
            Self::Club => "Club",
            Self::Event => "Event",
        }
    }

    /// Word used for the people counted in `members`.
    pub fn member_noun(self) -> &'static str {
        match self {
            Self::Club => "members",
            Self::Event => "attendees",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Error returned when a group kind cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGroupKind(pub String);

impl fmt::Display for UnknownGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `club` or `event`, got `{}`", self.0)
    }
}

impl std::error::Error for UnknownGroupKind {}

impl FromStr for GroupKind {
    type Err = UnknownGroupKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "club" | "clubs" => Ok(Self::Club),
            "event" | "events" => Ok(Self::Event),
            other => Err(UnknownGroupKind(other.to_owned())),
        }
    }
}

/// Validation errors for group records and creation drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    /// The id was blank.
    EmptyId,
    /// The name was blank, too long, or contained control characters.
    InvalidName,
    /// The description was blank.
    EmptyDescription,
    /// An event was given without a date.
    MissingDate,
    /// A club was given a date.
    UnexpectedDate,
    /// More members than capacity.
    OverCapacity {
        /// Recorded member count.
        members: u32,
        /// Capacity.
        max_members: u32,
    },
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "group id must not be empty"),
            Self::InvalidName => write!(
                f,
                "name is required and must be at most {GROUP_NAME_MAX} printable characters"
            ),
            Self::EmptyDescription => write!(f, "description is required"),
            Self::MissingDate => write!(f, "events need a date"),
            Self::UnexpectedDate => write!(f, "clubs do not have a date"),
            Self::OverCapacity {
                members,
                max_members,
            } => write!(f, "{members} members exceeds capacity of {max_members}"),
        }
    }
}

impl std::error::Error for GroupValidationError {}

/// Identifier of a group within its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    /// Validate and construct a [`GroupId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, GroupValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GroupValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Id for a numbered group.
    pub fn from_number(value: u64) -> Self {
        Self(value.to_string())
    }

    /// Numeric value, when the id is a plain integer.
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<GroupId> for String {
    fn from(value: GroupId) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupId {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Whether a group can take more members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    /// `members < max_members`.
    Open,
    /// `members >= max_members`.
    Full,
}

/// Form input for creating a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDraft {
    /// Group name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Event date; must be `None` for clubs.
    pub date: Option<NaiveDate>,
}

impl GroupDraft {
    /// Draft for a club.
    pub fn club(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            date: None,
        }
    }

    /// Draft for an event on `date`.
    pub fn event(
        name: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            date: Some(date),
        }
    }

    /// Check the draft against the rules for `kind`.
    pub fn validate(&self, kind: GroupKind) -> Result<(), GroupValidationError> {
        let name = self.name.trim();
        if !is_valid_group_name(name) {
            return Err(GroupValidationError::InvalidName);
        }
        if self.description.trim().is_empty() {
            return Err(GroupValidationError::EmptyDescription);
        }
        check_date(kind, self.date)
    }
}

fn check_date(kind: GroupKind, date: Option<NaiveDate>) -> Result<(), GroupValidationError> {
    match (kind, date) {
        (GroupKind::Event, None) => Err(GroupValidationError::MissingDate),
        (GroupKind::Club, Some(_)) => Err(GroupValidationError::UnexpectedDate),
        _ => Ok(()),
    }
}

/// A club or event in the catalog.
///
/// ## Invariants
/// - `members <= max_members`.
/// - Events have a date; clubs do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityGroup {
    kind: GroupKind,
    id: GroupId,
    name: String,
    description: String,
    members: u32,
    max_members: u32,
    date: Option<NaiveDate>,
    created_by: String,
    featured: bool,
}

/// Raw field values for [`CommunityGroup::try_new`].
#[derive(Debug, Clone)]
pub struct GroupRecord {
    /// Collection the group belongs to.
    pub kind: GroupKind,
    /// Identifier within the kind.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Current member count.
    pub members: u32,
    /// Capacity.
    pub max_members: u32,
    /// Event date.
    pub date: Option<NaiveDate>,
    /// `admin` or the creator's user id.
    pub created_by: String,
    /// Shown on the home view.
    pub featured: bool,
}

impl CommunityGroup {
    /// Validate an existing record, such as a seeded group.
    pub fn try_new(record: GroupRecord) -> Result<Self, GroupValidationError> {
        let GroupRecord {
            kind,
            id,
            name,
            description,
            members,
            max_members,
            date,
            created_by,
            featured,
        } = record;
        let id = GroupId::new(id)?;
        if !is_valid_group_name(name.trim()) {
            return Err(GroupValidationError::InvalidName);
        }
        if members > max_members {
            return Err(GroupValidationError::OverCapacity {
                members,
                max_members,
            });
        }
        check_date(kind, date)?;
        Ok(Self {
            kind,
            id,
            name: name.trim().to_owned(),
            description,
            members,
            max_members,
            date,
            created_by,
            featured,
        })
    }

    /// Build a newly created group: one member, the kind's capacity, not
    /// featured.
    pub fn create(
        kind: GroupKind,
        id: GroupId,
        draft: &GroupDraft,
        created_by: impl Into<String>,
    ) -> Result<Self, GroupValidationError> {
        draft.validate(kind)?;
        Ok(Self {
            kind,
            id,
            name: draft.name.trim().to_owned(),
            description: draft.description.trim().to_owned(),
            members: 1,
            max_members: kind.max_members(),
            date: draft.date,
            created_by: created_by.into(),
            featured: false,
        })
    }

    /// Collection the group belongs to.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Identifier within the kind.
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current member count.
    pub fn members(&self) -> u32 {
        self.members
    }

    /// Capacity.
    pub fn max_members(&self) -> u32 {
        self.max_members
    }

    /// Event date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// `admin` or the creator's user id.
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Shown on the home view.
    pub fn is_featured(&self) -> bool {
        self.featured
    }

    /// Open while below capacity.
    pub fn status(&self) -> GroupStatus {
        if self.is_full() {
            GroupStatus::Full
        } else {
            GroupStatus::Open
        }
    }

    /// Whether the group has reached capacity.
    pub fn is_full(&self) -> bool {
        self.members >= self.max_members
    }

    /// Remaining places.
    pub fn available_spots(&self) -> u32 {
        self.max_members.saturating_sub(self.members)
    }

    /// Count one more member. Returns `false` and leaves the count alone when
    /// the group is already full.
    pub fn admit_member(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.members += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn walkers() -> CommunityGroup {
        CommunityGroup::try_new(GroupRecord {
            kind: GroupKind::Club,
            id: "1".into(),
            name: "Morning Walkers Club".into(),
            description: "Daily walks".into(),
            members: 49,
            max_members: 50,
            date: None,
            created_by: "admin".into(),
            featured: true,
        })
        .expect("valid record")
    }

    #[rstest]
    #[case(GroupKind::Club, 50, "members")]
    #[case(GroupKind::Event, 500, "attendees")]
    fn kinds_have_fixed_capacity(
        #[case] kind: GroupKind,
        #[case] max: u32,
        #[case] noun: &str,
    ) {
        assert_eq!(kind.max_members(), max);
        assert_eq!(kind.member_noun(), noun);
    }

    #[rstest]
    #[case("club", GroupKind::Club)]
    #[case("Events", GroupKind::Event)]
    fn parses_kind(#[case] raw: &str, #[case] expected: GroupKind) {
        assert_eq!(raw.parse::<GroupKind>(), Ok(expected));
    }

    #[rstest]
    fn creating_a_club_starts_with_one_member() {
        let id = GroupId::new("3").expect("id");
        let group = CommunityGroup::create(
            GroupKind::Club,
            id,
            &GroupDraft::club(" Chess Circle ", "Weekly games"),
            "user-1",
        )
        .expect("valid draft");
        assert_eq!(group.members(), 1);
        assert_eq!(group.max_members(), 50);
        assert!(!group.is_featured());
        assert_eq!(group.name(), "Chess Circle");
        assert_eq!(group.created_by(), "user-1");
    }

    #[rstest]
    fn creating_an_event_uses_event_capacity() {
        let id = GroupId::new("3").expect("id");
        let group = CommunityGroup::create(
            GroupKind::Event,
            id,
            &GroupDraft::event("Tea Dance", "Ballroom", date(2024, 8, 1)),
            "user-1",
        )
        .expect("valid draft");
        assert_eq!(group.max_members(), 500);
        assert_eq!(group.date(), Some(date(2024, 8, 1)));
    }

    #[rstest]
    #[case(GroupKind::Club, GroupDraft::club("", "d"), GroupValidationError::InvalidName)]
    #[case(GroupKind::Club, GroupDraft::club("n", "  "), GroupValidationError::EmptyDescription)]
    #[case(GroupKind::Event, GroupDraft::club("n", "d"), GroupValidationError::MissingDate)]
    #[case(
        GroupKind::Club,
        GroupDraft::event("n", "d", date(2024, 1, 1)),
        GroupValidationError::UnexpectedDate
    )]
    fn invalid_drafts_are_rejected(
        #[case] kind: GroupKind,
        #[case] draft: GroupDraft,
        #[case] expected: GroupValidationError,
    ) {
        assert_eq!(draft.validate(kind), Err(expected));
    }

    #[rstest]
    fn over_capacity_records_are_rejected() {
        let result = CommunityGroup::try_new(GroupRecord {
            kind: GroupKind::Club,
            id: "9".into(),
            name: "Too Many".into(),
            description: String::new(),
            members: 51,
            max_members: 50,
            date: None,
            created_by: "admin".into(),
            featured: false,
        });
        assert_eq!(
            result,
            Err(GroupValidationError::OverCapacity {
                members: 51,
                max_members: 50
            })
        );
    }

    #[rstest]
    fn admitting_the_last_member_fills_the_group(mut walkers: CommunityGroup) {
        assert_eq!(walkers.status(), GroupStatus::Open);
        assert_eq!(walkers.available_spots(), 1);
        assert!(walkers.admit_member());
        assert_eq!(walkers.status(), GroupStatus::Full);
        assert!(!walkers.admit_member());
        assert_eq!(walkers.members(), 50);
    }
}
