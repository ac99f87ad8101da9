//! Line classification for family pages.

use crate::config::{
    is_family_anchor_id, CHILD_HEADER_PATTERN, END_OF_PAGE_MARKER, HUSBAND_PREFIX, WIFE_PREFIX,
};
use crate::markup::MarkupLine;
use crate::types::Relation;

/// A recognized person header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub relation: Relation,

    /// Cleaned display name.
    pub name: String,

    /// First link on the line.
    pub link: Option<String>,

    /// Family anchor on the header line itself, applied before the person
    /// is opened.
    pub family: Option<String>,
}

/// What a single line of a page is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Named anchor starting a family section.
    FamilyAnchor(String),

    /// Header introducing a new person.
    PersonHeader(Header),

    /// No more person data follows on this page.
    EndOfPage,

    /// Anything else.
    Ordinary,
}

/// A classified line together with what the classifier noticed on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: LineKind,

    /// Named anchor that is not a family id, if the line had one.
    pub unrecognized_anchor: Option<String>,
}

/// Classify one line of markup.
///
/// A named anchor that does not look like a family id is reported in
/// [`Classified::unrecognized_anchor`]; the line is then classified as if
/// the anchor were absent.
///
/// # Examples
/// ```
/// use family_extractor::classify::{classify_line, LineKind};
/// use family_extractor::types::Relation;
///
/// let line = classify_line(r#"Husband <a href="/p1">John Smith</a>"#);
/// let LineKind::PersonHeader(header) = line.kind else { panic!("not a header") };
/// assert_eq!(header.relation, Relation::Husband);
/// assert_eq!(header.name, "John Smith");
/// assert_eq!(header.link.as_deref(), Some("/p1"));
/// ```
#[must_use]
pub fn classify_line(line: &str) -> Classified {
    let markup = MarkupLine::parse(line);

    let mut unrecognized_anchor = None;
    let family = match markup.anchor_name {
        Some(name) if is_family_anchor_id(&name) => Some(name),
        Some(name) => {
            unrecognized_anchor = Some(name);
            None
        }
        None => None,
    };

    let kind = if markup.text.contains(END_OF_PAGE_MARKER) {
        LineKind::EndOfPage
    } else if let Some(relation) = header_relation(&markup.text) {
        LineKind::PersonHeader(Header {
            relation,
            name: clean_name(&markup.text, relation),
            link: markup.href,
            family,
        })
    } else if let Some(id) = family {
        LineKind::FamilyAnchor(id)
    } else {
        LineKind::Ordinary
    };

    Classified {
        kind,
        unrecognized_anchor,
    }
}

/// Decide whether visible text starts a person, and which kind.
fn header_relation(text: &str) -> Option<Relation> {
    let text = text.trim_start();
    if text.starts_with(HUSBAND_PREFIX) {
        Some(Relation::Husband)
    } else if text.starts_with(WIFE_PREFIX) {
        Some(Relation::Wife)
    } else if CHILD_HEADER_PATTERN.is_match(text) {
        Some(Relation::Child)
    } else {
        None
    }
}

/// Remove the relation marker from header text.
///
/// # Examples
/// ```
/// use family_extractor::classify::clean_name;
/// use family_extractor::types::Relation;
///
/// assert_eq!(clean_name(" Wife  Jane Doe ", Relation::Wife), "Jane Doe");
/// assert_eq!(clean_name("2 M Tom Jones", Relation::Child), "Tom Jones");
/// ```
#[must_use]
pub fn clean_name(text: &str, relation: Relation) -> String {
    let text = text.trim();
    let name = match relation {
        Relation::Husband => strip_word(text, HUSBAND_PREFIX),
        Relation::Wife => strip_word(text, WIFE_PREFIX),
        Relation::Child => CHILD_HEADER_PATTERN.replace(text, "").into_owned(),
    };
    name.trim().to_string()
}

/// Strip `"<word> "` from the start of `text`.
fn strip_word(text: &str, word: &str) -> String {
    text.strip_prefix(word)
        .and_then(|rest| rest.strip_prefix(' '))
        .unwrap_or(text)
        .to_string()
}
