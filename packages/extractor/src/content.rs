//! Content line parsing.
//!
//! Content lines are whatever follows a person header: birth dates, places,
//! notes. Lines with a `label: value` shape are split, everything else is
//! kept whole as a value so that nothing with visible text is lost.

use crate::markup::MarkupLine;
use crate::types::ContentFragment;

/// Parse an ordinary line into a content fragment.
///
/// Returns `None` when the line has no visible text.
///
/// # Examples
/// ```
/// use family_extractor::content::parse_content;
///
/// let fragment = parse_content("<b>Born:</b> 12 May 1850").unwrap();
/// assert_eq!(fragment.key.as_deref(), Some("Born"));
/// assert_eq!(fragment.value, "12 May 1850");
///
/// assert!(parse_content("<br>").is_none());
/// ```
#[must_use]
pub fn parse_content(line: &str) -> Option<ContentFragment> {
    let markup = MarkupLine::parse(line);
    let text = markup.text.trim();
    if text.is_empty() {
        return None;
    }

    let (key, value) = match text.split_once(':') {
        Some((key, value)) => (Some(key.trim().to_string()), value.trim().to_string()),
        None => (None, text.to_string()),
    };

    Some(ContentFragment {
        key,
        value,
        href: markup.href,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_value() {
        let fragment = parse_content("Age: 34").unwrap();
        assert_eq!(
            fragment,
            ContentFragment {
                key: Some("Age".to_string()),
                value: "34".to_string(),
                href: None,
            }
        );
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let fragment = parse_content("Died: 1901-03-04 at 10:30").unwrap();
        assert_eq!(fragment.key.as_deref(), Some("Died"));
        assert_eq!(fragment.value, "1901-03-04 at 10:30");
    }

    #[test]
    fn test_value_only() {
        let fragment = parse_content("  Emigrated to Canada  ").unwrap();
        assert!(fragment.key.is_none());
        assert_eq!(fragment.value, "Emigrated to Canada");
    }

    #[test]
    fn test_empty_value_after_colon() {
        let fragment = parse_content("Note:").unwrap();
        assert_eq!(fragment.key.as_deref(), Some("Note"));
        assert_eq!(fragment.value, "");
    }

    #[test]
    fn test_href_without_colon() {
        let fragment = parse_content(r#"<a href="/src/12">Parish register</a>"#).unwrap();
        assert!(fragment.key.is_none());
        assert_eq!(fragment.value, "Parish register");
        assert_eq!(fragment.href.as_deref(), Some("/src/12"));
    }

    #[test]
    fn test_href_with_colon() {
        let fragment = parse_content(r#"Father: <a href="f3.htm#f31">Bob</a>"#).unwrap();
        assert_eq!(fragment.key.as_deref(), Some("Father"));
        assert_eq!(fragment.value, "Bob");
        assert_eq!(fragment.href.as_deref(), Some("f3.htm#f31"));
    }

    #[test]
    fn test_blank_lines_dropped() {
        assert!(parse_content("").is_none());
        assert!(parse_content("   \t\n").is_none());
        assert!(parse_content("<tr><td>&nbsp;</td></tr>").is_none());
    }
}
