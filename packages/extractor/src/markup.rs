//! Narrow markup scanner for single lines of a family page.
//!
//! Pages are line-oriented HTML exported by an old genealogy program. The
//! extractor only ever needs three things from a line: the visible text, the
//! target of the first link and the name of the first anchor. This module
//! extracts exactly those in a single pass instead of building a DOM.

use std::borrow::Cow;

/// The parts of one markup line the classifier looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupLine {
    /// Visible text with tags removed and entities decoded. Not trimmed.
    pub text: String,

    /// `href` of the first `<a>` tag, if present and non-empty.
    pub href: Option<String>,

    /// `name` of the first `<a>` tag, if present and non-empty.
    pub anchor_name: Option<String>,
}

impl MarkupLine {
    /// Scan a line of markup.
    ///
    /// # Examples
    /// ```
    /// use family_extractor::markup::MarkupLine;
    ///
    /// let line = MarkupLine::parse(r#"Husband <a href="/p1">John &amp; Co</a>"#);
    /// assert_eq!(line.text, "Husband John & Co");
    /// assert_eq!(line.href.as_deref(), Some("/p1"));
    /// assert_eq!(line.anchor_name, None);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut raw_text = String::with_capacity(line.len());
        let mut first_anchor: Option<Vec<(String, String)>> = None;
        let mut rest = line;

        while let Some(open) = rest.find('<') {
            raw_text.push_str(&rest[..open]);
            let markup = &rest[open..];

            if let Some(comment) = markup.strip_prefix("<!--") {
                rest = match comment.find("-->") {
                    Some(end) => &comment[end + 3..],
                    None => "",
                };
                continue;
            }

            // An unterminated tag swallows the rest of the line
            let Some(end) = find_tag_end(markup) else {
                rest = "";
                break;
            };

            let body = &markup[1..end];
            if first_anchor.is_none() {
                if let Some(attrs) = anchor_attributes(body) {
                    first_anchor = Some(attrs);
                }
            }
            rest = &markup[end + 1..];
        }
        raw_text.push_str(rest);

        let attribute = |wanted: &str| {
            first_anchor.as_ref().and_then(|attrs| {
                attrs
                    .iter()
                    .find(|(name, _)| name == wanted)
                    .map(|(_, value)| value.clone())
                    .filter(|value| !value.is_empty())
            })
        };

        Self {
            text: decode(&raw_text).into_owned(),
            href: attribute("href"),
            anchor_name: attribute("name"),
        }
    }
}

/// Decode HTML entities (`&amp;`, `&nbsp;`, `&#233;` ...).
fn decode(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Find the index of the `>` closing the tag that starts at `markup[0]`.
///
/// Quoted attribute values may contain `>`.
fn find_tag_end(markup: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in markup.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Parse the attributes of an opening `<a ...>` tag body.
///
/// Returns `None` for any other tag, including closing tags.
fn anchor_attributes(body: &str) -> Option<Vec<(String, String)>> {
    let name_end = body
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(body.len());
    if !body[..name_end].eq_ignore_ascii_case("a") {
        return None;
    }
    Some(parse_attributes(&body[name_end..]))
}

/// Parse `name=value` pairs. Names are lowercased; values are unquoted and
/// entity-decoded. Attributes without a value get an empty string.
fn parse_attributes(mut input: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();

    loop {
        input = input.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if input.is_empty() {
            break;
        }

        let name_end = input
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(input.len());
        let name = input[..name_end].to_ascii_lowercase();
        input = input[name_end..].trim_start();

        let mut value = String::new();
        if let Some(after_eq) = input.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (raw, remainder) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let quoted = &after_eq[1..];
                    match quoted.find(q) {
                        Some(close) => (&quoted[..close], &quoted[close + 1..]),
                        None => (quoted, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(char::is_whitespace)
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            value = decode(raw).into_owned();
            input = remainder;
        }

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }

    attrs
}
