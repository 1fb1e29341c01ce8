//! User data model.
//!
//! A user is the signed-in identity of the session: who they are, how to
//! greet them, and whether they are old enough to take part.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Age from which a user may join, register for, or create groups.
pub const ADULT_AGE: u8 = 18;
/// Oldest age accepted by [`Age::new`].
pub const AGE_MAX: u8 = 150;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 80;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was blank.
    EmptyId,
    /// The identifier is not a UUID.
    InvalidId,
    /// The display name was blank.
    EmptyDisplayName,
    /// The display name exceeds [`DISPLAY_NAME_MAX`].
    DisplayNameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The email address was blank.
    EmptyEmail,
    /// The email address is not shaped like `local@domain.tld`.
    InvalidEmail,
    /// The age is not a whole number.
    InvalidAge,
    /// The age exceeds [`AGE_MAX`].
    AgeOutOfRange {
        /// Maximum permitted age.
        max: u8,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email address must not be empty"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::InvalidAge => write!(f, "age must be a whole number of years"),
            Self::AgeOutOfRange { max } => write!(f, "age must be at most {max}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name shown in greetings and chat messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`], trimming surrounding
    /// whitespace.
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is out of scope.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and construct an [`Email`], trimming surrounding whitespace.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The part before `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(years: u8) -> Result<Self, UserValidationError> {
        if years > AGE_MAX {
            return Err(UserValidationError::AgeOutOfRange { max: AGE_MAX });
        }
        Ok(Self(years))
    }

    /// Parse an age typed into a form field.
    ///
    /// # Examples
    /// ```
    /// use senior_spark::domain::Age;
    ///
    /// assert_eq!(Age::parse(" 67 ").map(|age| age.years()), Ok(67));
    /// assert!(Age::parse("sixty").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, UserValidationError> {
        let out_of_range = UserValidationError::AgeOutOfRange { max: AGE_MAX };
        let years: u64 = input.trim().parse().map_err(|err: ParseIntError| {
            if matches!(err.kind(), IntErrorKind::PosOverflow) {
                out_of_range.clone()
            } else {
                UserValidationError::InvalidAge
            }
        })?;
        u8::try_from(years).map_or(Err(out_of_range), Self::new)
    }

    /// Whole years.
    pub fn years(self) -> u8 {
        self.0
    }

    /// Whether the age meets [`ADULT_AGE`].
    pub fn is_adult(self) -> bool {
        self.0 >= ADULT_AGE
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Age {
    type Error = UserValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Signed-in community member.
///
/// Serialises to the stored `user` record:
/// `{"id": "...", "name": "...", "email": "...", "age": 67}` where `age` is
/// `null` when the user logged in without giving one.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `name` and `email` are trimmed and non-empty.
/// - `age`, when present, is at most [`AGE_MAX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: Email,
    age: Option<Age>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: DisplayName, email: Email, age: Option<Age>) -> Self {
        Self {
            id,
            name,
            email,
            age,
        }
    }

    /// Fallible constructor from raw strings, used by tests and fixtures.
    pub fn try_from_parts(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        age: Option<u8>,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let name = DisplayName::new(name)?;
        let email = Email::new(email)?;
        let age = age.map(Age::new).transpose()?;
        Ok(Self::new(id, name, email, age))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown to other members.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Recorded age, if the user supplied one.
    pub fn age(&self) -> Option<Age> {
        self.age
    }

    /// Whether the user has a recorded age of at least [`ADULT_AGE`].
    ///
    /// A user without a recorded age is not treated as an adult.
    pub fn is_adult(&self) -> bool {
        self.age.is_some_and(Age::is_adult)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    age: Option<u8>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            age,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age: age.map(Age::years),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.name, value.email, value.age)
    }
}
