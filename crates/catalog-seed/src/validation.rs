//! Group name validation mirroring the application's constraints.
//!
//! Keep these rules in sync with `GroupDraft` validation in the application
//! so that seeded and generated names are always accepted there.
//!
//! # Validation Rules
//!
//! - Must not be blank once trimmed
//! - At most [`GROUP_NAME_MAX`] characters
//! - No control characters

/// Maximum allowed length for a group name.
pub const GROUP_NAME_MAX: usize = 80;

/// Validates a group name.
///
/// # Examples
///
/// ```
/// use catalog_seed::is_valid_group_name;
///
/// assert!(is_valid_group_name("Morning Walkers Club"));
/// assert!(is_valid_group_name("O'Brien's Chess Circle"));
/// assert!(!is_valid_group_name("   "));
/// assert!(!is_valid_group_name("tab\tseparated"));
/// ```
#[must_use]
pub fn is_valid_group_name(name: &str) -> bool {
    if name.trim().is_empty() {
        return false;
    }
    if name.chars().count() > GROUP_NAME_MAX {
        return false;
    }
    !name.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::simple("Book Reading Circle")]
    #[case::apostrophe("Mary's Knitting Circle")]
    #[case::accented("Café Conversations")]
    #[case::one_char("A")]
    fn accepts_valid_names(#[case] name: &str) {
        assert!(is_valid_group_name(name));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[case::newline("Line\nBreak")]
    fn rejects_invalid_names(#[case] name: &str) {
        assert!(!is_valid_group_name(name));
    }

    #[test]
    fn accepts_maximum_length() {
        assert!(is_valid_group_name(&"a".repeat(GROUP_NAME_MAX)));
    }

    #[test]
    fn rejects_over_maximum_length() {
        assert!(!is_valid_group_name(&"a".repeat(GROUP_NAME_MAX + 1)));
    }
}
