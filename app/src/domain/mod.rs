//! Domain primitives, services and ports.
//!
//! Purpose: model the community (users, clubs, events, memberships and
//! chat) independently of how it is presented or stored. Adapters in
//! `inbound` and `outbound` depend on this module, never the reverse.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - SessionService: sign-up, login, logout and preferences over
//!   [`ports::LocalStorage`].
//! - Dashboard: per-session catalog, ledger and chat.
//! - can_join / can_create: pure membership and creation gates.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod community;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod ports;
pub mod session;
pub mod user;
pub mod vision;

pub use self::auth::{AuthValidationError, LoginRequest, SignUpRequest};
pub use self::catalog::{Catalog, DuplicateGroup};
pub use self::chat::{ChatGreetings, ChatMessage, ChatRoom, Greeting};
pub use self::community::{
    CommunityGroup, GroupDraft, GroupId, GroupKind, GroupRecord, GroupStatus,
    GroupValidationError, UnknownGroupKind,
};
pub use self::dashboard::{Dashboard, GroupDetail, HomeView, ProfileView};
pub use self::error::{Error, ErrorCode};
pub use self::gate::{DenialReason, GateDecision, can_create, can_join};
pub use self::ledger::MembershipLedger;
pub use self::session::{
    SIGN_UP_UNDERAGE_MESSAGE, SessionService, SessionState, USER_KEY, VISION_LEVEL_KEY,
};
pub use self::user::{ADULT_AGE, Age, DisplayName, Email, User, UserId, UserValidationError};
pub use self::vision::{VisionLevel, VisionLevelError};

/// Result alias for domain use cases.
///
/// # Examples
/// ```
/// use senior_spark::domain::{DomainResult, Error};
///
/// fn refuse() -> DomainResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(refuse().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
