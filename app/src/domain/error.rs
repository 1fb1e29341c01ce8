//! Domain-level error types.
//!
//! These errors are front-end agnostic. Inbound adapters map them to
//! notices, exit codes, or any other presentation they need.

use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No user is signed in.
    Unauthorized,
    /// Signed in but not permitted to perform this action.
    Forbidden,
    /// The requested group does not exist.
    NotFound,
    /// The action clashes with current state (a full group, an existing
    /// membership).
    Conflict,
    /// An unexpected error occurred inside the domain or an adapter.
    InternalError,
}

impl ErrorCode {
    /// Snake-case identifier, used as the `code` field in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InternalError => "internal_error",
        }
    }
}

/// Failure returned by session and dashboard operations.
///
/// # Examples
/// ```
/// use senior_spark::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such club");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Error {
    /// Create an error with `code` and a user-facing `message`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// The `reason` field of the details, when one was attached.
    ///
    /// Gate denials and membership conflicts carry a reason such as
    /// `underage`, `full` or `already_member` so adapters can choose the
    /// right notice without parsing the message.
    ///
    /// # Examples
    /// ```
    /// use senior_spark::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::conflict("club is full").with_details(json!({ "reason": "full" }));
    /// assert_eq!(err.reason(), Some("full"));
    /// ```
    pub fn reason(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("reason"))
            .and_then(Value::as_str)
    }

    /// Attach JSON details, typically `{"reason": ...}`.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Malformed input, such as a blank chat message or an invalid draft.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// No session; the user must sign in first.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// An age or membership gate refused the action.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Unknown club or event.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// The group is full or the user already belongs to it.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Storage or seeding failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
