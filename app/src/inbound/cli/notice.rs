//! Transient notices reporting the outcome of a user action.

use std::fmt;

use tracing::debug;

use crate::domain::{Error, ErrorCode, GroupKind, VisionLevel};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    /// Informational or success.
    Default,
    /// Something was refused or failed.
    Destructive,
}

/// The action a notice reports on; selects failure titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Creating an account.
    SignUp,
    /// Signing in.
    LogIn,
    /// Joining a club or registering for an event.
    Join(GroupKind),
    /// Creating a club or event.
    Create(GroupKind),
    /// Posting a chat message.
    Post,
    /// Anything else.
    Other,
}

/// Title, description and variant shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short heading.
    pub title: String,
    /// One-sentence explanation.
    pub description: String,
    /// Visual weight.
    pub variant: NoticeVariant,
}

impl Notice {
    fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: NoticeVariant,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    /// Account created.
    pub fn signed_up() -> Self {
        Self::new(
            "Welcome to Senior Spark!",
            "Your account has been created successfully.",
            NoticeVariant::Default,
        )
    }

    /// Signed in.
    pub fn logged_in() -> Self {
        Self::new(
            "Welcome back!",
            "You've successfully logged in.",
            NoticeVariant::Default,
        )
    }

    /// Signed out.
    pub fn logged_out() -> Self {
        Self::new("Signed out", "See you soon!", NoticeVariant::Default)
    }

    /// Joined a club or registered for an event.
    pub fn joined(kind: GroupKind, name: &str) -> Self {
        match kind {
            GroupKind::Club => Self::new(
                "Joined Club!",
                format!("You've successfully joined {name}."),
                NoticeVariant::Default,
            ),
            GroupKind::Event => Self::new(
                "Registered!",
                format!("You've successfully registered for {name}."),
                NoticeVariant::Default,
            ),
        }
    }

    /// Created a club or event.
    pub fn created(kind: GroupKind, name: &str) -> Self {
        Self::new(
            format!("{} Created!", kind.title()),
            format!("{name} has been created successfully."),
            NoticeVariant::Default,
        )
    }

    /// Vision level saved.
    pub fn vision_saved(level: VisionLevel) -> Self {
        Self::new(
            "Vision level updated",
            format!("Text size is now {} ({}).", level, level.label()),
            NoticeVariant::Default,
        )
    }

    /// No signed-in user.
    pub fn sign_in_required() -> Self {
        Self::failure(
            Action::Other,
            &Error::unauthorized("Please sign up or log in first."),
        )
    }

    /// Map a refused action to a notice.
    pub fn failure(action: Action, err: &Error) -> Self {
        debug!(code = err.code().as_str(), reason = err.reason(), ?action, "action refused");
        let title = match (err.reason(), action) {
            (Some("underage"), Action::SignUp) => "Age Restriction".to_owned(),
            (Some("underage"), _) => "Age Verification Failed".to_owned(),
            (Some("full"), Action::Join(kind)) => format!("{} Full", kind.title()),
            (Some("already_member"), Action::Join(GroupKind::Club)) => "Already Joined".to_owned(),
            (Some("already_member"), Action::Join(GroupKind::Event)) => {
                "Already Registered".to_owned()
            }
            (Some("not_member"), _) => "Members Only".to_owned(),
            _ => code_title(err.code()).to_owned(),
        };
        Self::new(title, err.message(), NoticeVariant::Destructive)
    }
}

fn code_title(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Check Your Details",
        ErrorCode::Unauthorized => "Sign In Required",
        ErrorCode::Forbidden => "Not Allowed",
        ErrorCode::NotFound => "Not Found",
        ErrorCode::Conflict => "Unavailable",
        _ => "Something Went Wrong",
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.variant {
            NoticeVariant::Default => "*",
            NoticeVariant::Destructive => "!",
        };
        write!(f, "{marker} {}: {}", self.title, self.description)
    }
}
