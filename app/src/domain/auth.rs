//! Sign-up and login form payloads.
//!
//! Inbound adapters hand raw form strings to these constructors so the
//! session service only ever sees validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Age, DisplayName, Email, UserValidationError};

/// Domain error returned when sign-up or login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Password was blank.
    EmptyPassword,
    /// Sign-up requires an age.
    MissingAge,
    /// A user field failed validation.
    User(UserValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::MissingAge => write!(f, "age is required to sign up"),
            Self::User(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for AuthValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::User(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, AuthValidationError> {
    if password.is_empty() {
        return Err(AuthValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated sign-up form.
///
/// ## Invariants
/// - `name` and `email` satisfy their newtype rules.
/// - `password` is non-empty and is zeroed when dropped.
/// - `age` is always present; whether it is old enough is decided by the
///   session service, not here.
///
/// # Examples
/// ```
/// use senior_spark::domain::SignUpRequest;
///
/// let form = SignUpRequest::try_from_parts("Margaret", "m@example.com", "pw", "67").unwrap();
/// assert_eq!(form.age().years(), 67);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    name: DisplayName,
    email: Email,
    password: Zeroizing<String>,
    age: Age,
}

impl SignUpRequest {
    /// Construct a sign-up request from raw form inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        age: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = DisplayName::new(name)?;
        let email = Email::new(email)?;
        let password = require_password(password)?;
        if age.trim().is_empty() {
            return Err(AuthValidationError::MissingAge);
        }
        let age = Age::parse(age)?;
        Ok(Self {
            name,
            email,
            password,
            age,
        })
    }

    /// Display name chosen by the new member.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Declared age.
    pub fn age(&self) -> Age {
        self.age
    }
}

/// Validated login form.
///
/// Name and age are optional. Blank optional fields are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    email: Email,
    password: Zeroizing<String>,
    name: Option<DisplayName>,
    age: Option<Age>,
}

impl LoginRequest {
    /// Construct a login request from raw form inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: Option<&str>,
        age: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        let email = Email::new(email)?;
        let password = require_password(password)?;
        let name = name
            .filter(|raw| !raw.trim().is_empty())
            .map(DisplayName::new)
            .transpose()?;
        let age = age
            .filter(|raw| !raw.trim().is_empty())
            .map(Age::parse)
            .transpose()?;
        Ok(Self {
            email,
            password,
            name,
            age,
        })
    }

    /// Contact email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Name supplied on the form, if any.
    pub fn name(&self) -> Option<&DisplayName> {
        self.name.as_ref()
    }

    /// Age supplied on the form, if any.
    pub fn age(&self) -> Option<Age> {
        self.age
    }

    /// Name to greet the user with: the supplied name, or the local part of
    /// the email address.
    pub fn display_name(&self) -> Result<DisplayName, AuthValidationError> {
        match &self.name {
            Some(name) => Ok(name.clone()),
            None => Ok(DisplayName::new(self.email.local_part())?),
        }
    }
}
