//! Vision level accessibility preference.
//!
//! The level scales the root font size of every view. It is persisted
//! under the `visionLevel` storage key as decimal text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest accepted level.
pub const VISION_LEVEL_MIN: i8 = -3;
/// Largest accepted level.
pub const VISION_LEVEL_MAX: i8 = 2;

const BASE_FONT_SIZE_PX: i32 = 16;
const FONT_STEP_PX: i32 = 4;

/// Errors raised when a vision level is out of range or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionLevelError {
    /// The input is not an integer.
    NotANumber,
    /// The level is outside the accepted range.
    OutOfRange {
        /// Rejected value.
        value: i64,
    },
}

impl fmt::Display for VisionLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "vision level must be a whole number"),
            Self::OutOfRange { value } => write!(
                f,
                "vision level {value} is outside {VISION_LEVEL_MIN}..={VISION_LEVEL_MAX}"
            ),
        }
    }
}

impl std::error::Error for VisionLevelError {}

/// Vision level in `-3..=2`; `0` is the normal size.
///
/// # Examples
/// ```
/// use senior_spark::domain::VisionLevel;
///
/// let level: VisionLevel = "-2".parse().unwrap();
/// assert_eq!(level.font_size_px(), 8);
/// assert_eq!(level.label(), "Strong magnification");
/// assert_eq!(level.to_string(), "-2");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct VisionLevel(i8);

impl VisionLevel {
    /// The default level.
    pub const NORMAL: Self = Self(0);

    /// Validate and construct a level.
    pub fn new(value: i64) -> Result<Self, VisionLevelError> {
        i8::try_from(value)
            .ok()
            .filter(|level| (VISION_LEVEL_MIN..=VISION_LEVEL_MAX).contains(level))
            .map(Self)
            .ok_or(VisionLevelError::OutOfRange { value })
    }

    /// Every selectable level in ascending order.
    pub fn options() -> impl Iterator<Item = Self> {
        (VISION_LEVEL_MIN..=VISION_LEVEL_MAX).map(Self)
    }

    /// Raw integer value.
    pub fn value(self) -> i8 {
        self.0
    }

    /// Root font size in pixels.
    pub fn font_size_px(self) -> i32 {
        BASE_FONT_SIZE_PX + FONT_STEP_PX * i32::from(self.0)
    }

    /// Human-readable description shown next to the level.
    pub fn label(self) -> &'static str {
        match self.0 {
            -3 => "Stronger magnification",
            -2 => "Strong magnification",
            -1 => "Moderate magnification",
            1 => "Slight reduction",
            2 => "Moderate reduction",
            _ => "Normal size",
        }
    }

    /// Value written to storage.
    pub fn storage_value(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for VisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("Normal"),
            level if level > 0 => write!(f, "+{level}"),
            level => write!(f, "{level}"),
        }
    }
}

impl FromStr for VisionLevel {
    type Err = VisionLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("normal") {
            return Ok(Self::NORMAL);
        }
        let value: i64 = trimmed
            .strip_prefix('+')
            .unwrap_or(trimmed)
            .parse()
            .map_err(|_| VisionLevelError::NotANumber)?;
        Self::new(value)
    }
}

impl From<VisionLevel> for i64 {
    fn from(value: VisionLevel) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<i64> for VisionLevel {
    type Error = VisionLevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
