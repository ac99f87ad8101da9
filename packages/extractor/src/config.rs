//! Configuration constants and line patterns for the extractor.

use regex::Regex;
use std::sync::LazyLock;

/// Default glob for family pages: one letter `f`, one digit, `.htm`.
pub const DEFAULT_PAGE_PATTERN: &str = "f?.htm";

/// Default file name of the pipe-delimited family index.
pub const DEFAULT_INDEX_FILE: &str = "gendex.txt";

/// Field separator used by the family index.
pub const INDEX_DELIMITER: char = '|';

/// Phrase marking the end of the person data on a page.
pub const END_OF_PAGE_MARKER: &str = "Table of Contents";

/// Visible-text prefix of a husband header line.
pub const HUSBAND_PREFIX: &str = "Husband";

/// Visible-text prefix of a wife header line.
pub const WIFE_PREFIX: &str = "Wife";

/// Family anchor name: `f` followed by one or more digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FAMILY_ANCHOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f\d+$").expect("valid regex"));

/// Child header: birth-order digit, whitespace, single-letter sex marker.
///
/// Stricter than the historical `\d\s+[MF]` match: the trailing word
/// boundary keeps lines such as `2 Mary` from opening a child.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static CHILD_HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\s+[MF]\b").expect("valid regex"));

/// Check whether an anchor name identifies a family section.
///
/// # Examples
/// ```
/// use family_extractor::config::is_family_anchor_id;
///
/// assert!(is_family_anchor_id("f12"));
/// assert!(!is_family_anchor_id("note1"));
/// assert!(!is_family_anchor_id("f"));
/// ```
#[must_use]
pub fn is_family_anchor_id(text: &str) -> bool {
    FAMILY_ANCHOR_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_family_anchor_id_valid() {
        assert!(is_family_anchor_id("f1"));
        assert!(is_family_anchor_id("f12"));
        assert!(is_family_anchor_id("f0042"));
    }

    #[test]
    fn test_is_family_anchor_id_invalid() {
        assert!(!is_family_anchor_id(""));
        assert!(!is_family_anchor_id("f"));
        assert!(!is_family_anchor_id("F12")); // Uppercase
        assert!(!is_family_anchor_id("f12a")); // Trailing letter
        assert!(!is_family_anchor_id("xf12")); // Leading letter
        assert!(!is_family_anchor_id("note1"));
        assert!(!is_family_anchor_id(" f12"));
    }

    #[test]
    fn test_child_header_pattern() {
        assert!(CHILD_HEADER_PATTERN.is_match("2 M John Smith"));
        assert!(CHILD_HEADER_PATTERN.is_match("1\tF Mary"));
        assert!(!CHILD_HEADER_PATTERN.is_match("12 M John")); // Two digits before space
        assert!(!CHILD_HEADER_PATTERN.is_match("Born 2 M"));
        assert!(!CHILD_HEADER_PATTERN.is_match("2 X Unknown"));
        assert!(!CHILD_HEADER_PATTERN.is_match("2 Mary")); // Not a single letter
    }
}
