//! Root controller for a signed-in session.
//!
//! The dashboard owns every piece of per-session state: the catalog, the
//! membership ledger and the chat rooms. Nothing here is persisted; the
//! state lives as long as the value.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use super::catalog::Catalog;
use super::chat::{ChatGreetings, ChatMessage, ChatRoom};
use super::community::{CommunityGroup, GroupDraft, GroupId, GroupKind};
use super::error::Error;
use super::gate::{DenialReason, GateDecision, can_create, can_join};
use super::ledger::MembershipLedger;
use super::user::User;

/// Featured groups and the name to greet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView<'a> {
    /// Display name of the signed-in user.
    pub greeting_name: &'a str,
    /// Featured clubs in catalog order.
    pub featured_clubs: Vec<&'a CommunityGroup>,
    /// Featured events in catalog order.
    pub featured_events: Vec<&'a CommunityGroup>,
}

/// A single group as seen by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDetail<'a> {
    /// The group.
    pub group: &'a CommunityGroup,
    /// Whether the ledger lists the group for this user.
    pub is_member: bool,
    /// Chat transcript; only members can see it.
    pub transcript: Option<&'a [ChatMessage]>,
}

/// The signed-in user and their memberships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView<'a> {
    /// Signed-in user.
    pub user: &'a User,
    /// Joined clubs in ledger order.
    pub joined_clubs: Vec<&'a CommunityGroup>,
    /// Registered events in ledger order.
    pub registered_events: Vec<&'a CommunityGroup>,
}

fn join_phrase(kind: GroupKind) -> &'static str {
    match kind {
        GroupKind::Club => "join this club",
        GroupKind::Event => "register for this event",
    }
}

fn create_phrase(kind: GroupKind) -> &'static str {
    match kind {
        GroupKind::Club => "create a club",
        GroupKind::Event => "create an event",
    }
}

fn denial_error(reason: DenialReason, message: String) -> Error {
    let details = json!({ "reason": reason.as_str() });
    match reason {
        DenialReason::Underage => Error::forbidden(message).with_details(details),
        DenialReason::Full => Error::conflict(message).with_details(details),
    }
}

fn not_found(kind: GroupKind, id: &GroupId) -> Error {
    Error::not_found(format!("{} {id} does not exist", kind.title()))
        .with_details(json!({ "kind": kind.noun(), "id": id.as_ref() }))
}

/// Session controller exposing every catalog operation.
#[derive(Clone)]
pub struct Dashboard {
    user: User,
    catalog: Catalog,
    ledger: MembershipLedger,
    rooms: BTreeMap<(GroupKind, GroupId), ChatRoom>,
    greetings: ChatGreetings,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("user", &self.user)
            .field("catalog", &self.catalog)
            .field("ledger", &self.ledger)
            .field("rooms", &self.rooms.len())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Start a session for `user` over a freshly seeded catalog.
    pub fn new(
        user: User,
        catalog: Catalog,
        greetings: ChatGreetings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user,
            catalog,
            ledger: MembershipLedger::new(),
            rooms: BTreeMap::new(),
            greetings,
            clock,
        }
    }

    /// Signed-in user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Session catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Session membership ledger.
    pub fn ledger(&self) -> &MembershipLedger {
        &self.ledger
    }

    /// Greeting name plus featured clubs and events.
    pub fn home(&self) -> HomeView<'_> {
        HomeView {
            greeting_name: self.user.name().as_ref(),
            featured_clubs: self.catalog.featured(GroupKind::Club).collect(),
            featured_events: self.catalog.featured(GroupKind::Event).collect(),
        }
    }

    /// Every group of `kind` in insertion order.
    pub fn groups(&self, kind: GroupKind) -> &[CommunityGroup] {
        self.catalog.groups(kind)
    }

    fn room(&mut self, kind: GroupKind, id: &GroupId) -> &mut ChatRoom {
        let greetings = &self.greetings;
        let clock = &self.clock;
        self.rooms
            .entry((kind, id.clone()))
            .or_insert_with(|| {
                debug!(%kind, %id, "opening chat room");
                ChatRoom::seeded(greetings.for_kind(kind), clock.utc())
            })
    }

    /// One group, with its chat transcript when the user is a member.
    pub fn detail(&mut self, kind: GroupKind, id: &GroupId) -> Result<GroupDetail<'_>, Error> {
        if self.catalog.find(kind, id).is_none() {
            return Err(not_found(kind, id));
        }
        let is_member = self.ledger.contains(kind, id);
        if is_member {
            self.room(kind, id);
        }
        let group = self
            .catalog
            .find(kind, id)
            .ok_or_else(|| not_found(kind, id))?;
        let transcript = if is_member {
            self.rooms
                .get(&(kind, id.clone()))
                .map(ChatRoom::messages)
        } else {
            None
        };
        Ok(GroupDetail {
            group,
            is_member,
            transcript,
        })
    }

    /// Join a club or register for an event.
    ///
    /// On success the group's member count grows by one and the ledger
    /// records the group. Denials leave all state untouched.
    pub fn join(&mut self, kind: GroupKind, id: &GroupId) -> Result<&CommunityGroup, Error> {
        let group = self
            .catalog
            .find(kind, id)
            .ok_or_else(|| not_found(kind, id))?;
        if self.ledger.contains(kind, id) {
            return Err(Error::conflict(format!(
                "You are already signed up for {}.",
                group.name()
            ))
            .with_details(json!({ "reason": "already_member" })));
        }
        if let GateDecision::Denied(reason) = can_join(&self.user, group) {
            info!(%kind, %id, %reason, "join refused");
            let message = match reason {
                DenialReason::Underage => {
                    format!("You must be 18 or older to {}.", join_phrase(kind))
                }
                DenialReason::Full => {
                    format!("This {kind} has reached its maximum capacity.")
                }
            };
            return Err(denial_error(reason, message));
        }

        let group = self
            .catalog
            .find_mut(kind, id)
            .ok_or_else(|| not_found(kind, id))?;
        if !group.admit_member() {
            let message = format!("This {kind} has reached its maximum capacity.");
            return Err(denial_error(DenialReason::Full, message));
        }
        self.ledger.record(kind, id.clone());
        info!(%kind, %id, members = group.members(), "joined");
        Ok(group)
    }

    /// Create a club or event owned by the signed-in user.
    pub fn create(
        &mut self,
        kind: GroupKind,
        draft: &GroupDraft,
    ) -> Result<&CommunityGroup, Error> {
        if let GateDecision::Denied(reason) = can_create(&self.user) {
            info!(%kind, "create refused");
            let message = format!("You must be 18 or older to {}.", create_phrase(kind));
            return Err(denial_error(reason, message));
        }
        let id = self
            .catalog
            .next_id(kind)
            .ok_or_else(|| Error::internal(format!("no {kind} ids are left to assign")))?;
        let group = CommunityGroup::create(kind, id.clone(), draft, self.user.id().to_string())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.catalog
            .insert(group)
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(%kind, %id, "created");
        self.catalog
            .find(kind, &id)
            .ok_or_else(|| Error::internal(format!("{kind} {id} vanished after insert")))
    }

    /// Post a chat message as the signed-in user.
    pub fn post_message(
        &mut self,
        kind: GroupKind,
        id: &GroupId,
        text: &str,
    ) -> Result<&ChatMessage, Error> {
        let group = self
            .catalog
            .find(kind, id)
            .ok_or_else(|| not_found(kind, id))?;
        if !self.ledger.contains(kind, id) {
            return Err(Error::forbidden(format!(
                "Only {} of {} can chat here.",
                kind.member_noun(),
                group.name()
            ))
            .with_details(json!({ "reason": "not_member" })));
        }
        if text.trim().is_empty() {
            return Err(Error::invalid_request("Message must not be empty."));
        }
        let author = self.user.name().as_ref().to_owned();
        let now = self.clock.utc();
        let message = self
            .room(kind, id)
            .post(&author, text, now)
            .ok_or_else(|| Error::invalid_request("Message must not be empty."))?;
        debug!(%kind, %id, message_id = message.id, "message posted");
        Ok(message)
    }

    /// The user and the groups they belong to.
    pub fn profile(&self) -> ProfileView<'_> {
        let resolve = |kind: GroupKind| -> Vec<&CommunityGroup> {
            self.ledger
                .entries(kind)
                .iter()
                .filter_map(|id| self.catalog.find(kind, id))
                .collect()
        };
        ProfileView {
            user: &self.user,
            joined_clubs: resolve(GroupKind::Club),
            registered_events: resolve(GroupKind::Event),
        }
    }
}
