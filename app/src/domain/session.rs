//! Persistent user session backed by local storage.
//!
//! The session is the only state that survives between runs. It owns two
//! storage entries, [`USER_KEY`] and [`VISION_LEVEL_KEY`].

use serde_json::json;
use tracing::{debug, info, warn};

use super::auth::{LoginRequest, SignUpRequest};
use super::error::Error;
use super::ports::{LocalStorage, LocalStorageError};
use super::user::{User, UserId};
use super::vision::VisionLevel;

/// Storage key holding the signed-in user as JSON.
pub const USER_KEY: &str = "user";
/// Storage key holding the vision level as decimal text.
pub const VISION_LEVEL_KEY: &str = "visionLevel";

/// Message shown when an under-18 sign-up is refused.
pub const SIGN_UP_UNDERAGE_MESSAGE: &str = "You must be 18 or older to join our community.";

/// Session state read back at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Signed-in user, if any.
    pub user: Option<User>,
    /// Saved vision level, or the default.
    pub vision_level: VisionLevel,
}

fn storage_error(err: LocalStorageError) -> Error {
    Error::internal(err.to_string())
}

/// Sign-up, login, logout and preference persistence.
#[derive(Debug, Clone)]
pub struct SessionService<S> {
    storage: S,
}

impl<S: LocalStorage> SessionService<S> {
    /// Create a service over `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the persisted session.
    ///
    /// A malformed or unreadable user entry is treated as signed out. A
    /// missing, malformed or unreadable vision level yields
    /// [`VisionLevel::NORMAL`].
    pub fn restore(&self) -> Result<SessionState, Error> {
        let user = match self.read_entry(USER_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "ignoring malformed stored user");
                    None
                }
            },
        };
        let vision_level = self.read_vision_level()?;
        debug!(signed_in = user.is_some(), %vision_level, "session restored");
        Ok(SessionState { user, vision_level })
    }

    fn read_vision_level(&self) -> Result<VisionLevel, Error> {
        let Some(raw) = self.read_entry(VISION_LEVEL_KEY)? else {
            return Ok(VisionLevel::NORMAL);
        };
        match raw.parse::<VisionLevel>() {
            Ok(level) => Ok(level),
            Err(err) => {
                warn!(error = %err, raw = %raw, "ignoring malformed vision level");
                Ok(VisionLevel::NORMAL)
            }
        }
    }

    /// Read one entry; an unreadable entry counts as missing.
    fn read_entry(&self, key: &str) -> Result<Option<String>, Error> {
        match self.storage.get_item(key) {
            Ok(value) => Ok(value),
            Err(err @ LocalStorageError::Read { .. }) => {
                warn!(key, error = %err, "ignoring unreadable storage entry");
                Ok(None)
            }
            Err(err) => Err(storage_error(err)),
        }
    }

    fn store_user(&self, user: &User) -> Result<(), Error> {
        let raw = serde_json::to_string(user)
            .map_err(|err| Error::internal(format!("failed to encode user: {err}")))?;
        self.storage
            .set_item(USER_KEY, &raw)
            .map_err(storage_error)
    }

    /// Register a new member and sign them in.
    ///
    /// Under-18 sign-ups are refused with [`ErrorCode::Forbidden`] and the
    /// `underage` reason; nothing is written.
    ///
    /// [`ErrorCode::Forbidden`]: super::error::ErrorCode::Forbidden
    pub fn sign_up(&self, request: &SignUpRequest) -> Result<User, Error> {
        if !request.age().is_adult() {
            info!(age = request.age().years(), "refusing underage sign-up");
            return Err(Error::forbidden(SIGN_UP_UNDERAGE_MESSAGE)
                .with_details(json!({ "reason": "underage" })));
        }
        let user = User::new(
            UserId::random(),
            request.name().clone(),
            request.email().clone(),
            Some(request.age()),
        );
        self.store_user(&user)?;
        info!(user_id = %user.id(), "signed up");
        Ok(user)
    }

    /// Sign in. Name falls back to the email's local part; age may be absent.
    pub fn log_in(&self, request: &LoginRequest) -> Result<User, Error> {
        let name = request
            .display_name()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = User::new(UserId::random(), name, request.email().clone(), request.age());
        self.store_user(&user)?;
        info!(user_id = %user.id(), has_age = user.age().is_some(), "logged in");
        Ok(user)
    }

    /// Persist a new vision level.
    pub fn set_vision_level(&self, level: VisionLevel) -> Result<(), Error> {
        self.storage
            .set_item(VISION_LEVEL_KEY, &level.storage_value())
            .map_err(storage_error)?;
        info!(%level, "vision level saved");
        Ok(())
    }

    /// Clear both session entries.
    pub fn log_out(&self) -> Result<(), Error> {
        self.storage.remove_item(USER_KEY).map_err(storage_error)?;
        self.storage
            .remove_item(VISION_LEVEL_KEY)
            .map_err(storage_error)?;
        info!("logged out");
        Ok(())
    }
}
