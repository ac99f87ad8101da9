//! Page scanner: turns the lines of one family page into person records.
//!
//! The scanner is a two-state machine driven by [`classify_line`]:
//!
//! ```text
//!                 header                      header (emit previous)
//! NoOpenPerson ────────────► PersonOpen ◄──────────────┐
//!      │                       │    │                  │
//!      │ end of page           │    └──────────────────┘
//!      ▼                       │ end of page (emit)
//!     Done ◄───────────────────┘
//! ```
//!
//! Family anchors update the family stamped onto the next person; any
//! visible text on the anchor line is still content. Ordinary lines are
//! content of the open person, or ignored before the first header.

use std::fmt;
use std::mem;

use tracing::{debug, warn};

use crate::classify::{classify_line, Header, LineKind};
use crate::content::parse_content;
use crate::types::PersonRecord;

/// What to do with a person still open when the input runs out without an
/// end-of-page marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingRecord {
    /// Emit it like any other record.
    #[default]
    Emit,

    /// Discard it.
    Drop,
}

/// Options for a page scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub trailing_record: TrailingRecord,
}

/// A non-fatal problem noticed while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based line number on the page.
    pub line: usize,

    /// The named anchor that is not a family id.
    pub anchor: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: skipping unrecognized family anchor '{}'",
            self.line, self.anchor
        )
    }
}

#[derive(Debug)]
enum State {
    NoOpenPerson,
    PersonOpen(PersonRecord),
    Done,
}

/// Iterator over the persons of a single page, in header order.
///
/// # Examples
/// ```
/// use family_extractor::scanner::PageScanner;
/// use family_extractor::types::Relation;
///
/// let lines = [
///     r#"Husband <a href="/p1">John Smith</a>"#,
///     "Age: 34",
///     "Table of Contents",
/// ];
/// let people: Vec<_> = PageScanner::new(lines).collect();
/// assert_eq!(people.len(), 1);
/// assert_eq!(people[0].relation, Relation::Husband);
/// assert_eq!(people[0].name, "John Smith");
/// assert_eq!(people[0].content[0].value, "34");
/// ```
#[derive(Debug)]
pub struct PageScanner<I> {
    lines: I,
    options: ScanOptions,
    state: State,
    current_family: Option<String>,
    line_no: usize,
    warnings: Vec<Warning>,
}

impl<I> PageScanner<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Scan lines with the default options.
    pub fn new<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self::with_options(lines, ScanOptions::default())
    }

    /// Scan lines with explicit options.
    pub fn with_options<L>(lines: L, options: ScanOptions) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            options,
            state: State::NoOpenPerson,
            current_family: None,
            line_no: 0,
            warnings: Vec::new(),
        }
    }

    /// Warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consume the scanner, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Open a record for `header`, returning the one it closes.
    fn open(&mut self, header: Header) -> Option<PersonRecord> {
        if let Some(family) = header.family {
            self.current_family = Some(family);
        }
        let person = PersonRecord::new(header.relation, header.name, header.link)
            .with_family(self.current_family.clone().unwrap_or_default());

        match mem::replace(&mut self.state, State::PersonOpen(person)) {
            State::PersonOpen(previous) => Some(previous),
            State::NoOpenPerson | State::Done => None,
        }
    }

    /// Add the line as content of the open person, if there is one.
    fn push_content(&mut self, line: &str) {
        if let State::PersonOpen(person) = &mut self.state {
            if let Some(fragment) = parse_content(line) {
                person.push_content(fragment);
            }
        }
    }

    /// Close the page, returning the open record if any.
    fn finish(&mut self) -> Option<PersonRecord> {
        match mem::replace(&mut self.state, State::Done) {
            State::PersonOpen(person) => Some(person),
            State::NoOpenPerson | State::Done => None,
        }
    }
}

impl<I> Iterator for PageScanner<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = PersonRecord;

    fn next(&mut self) -> Option<PersonRecord> {
        if matches!(self.state, State::Done) {
            return None;
        }

        while let Some(line) = self.lines.next() {
            self.line_no += 1;
            let line = line.as_ref();
            let classified = classify_line(line);

            if let Some(anchor) = classified.unrecognized_anchor {
                warn!(line = self.line_no, anchor = %anchor, "Skipping unrecognized family anchor");
                self.warnings.push(Warning {
                    line: self.line_no,
                    anchor,
                });
            }

            match classified.kind {
                LineKind::EndOfPage => return self.finish(),
                LineKind::PersonHeader(header) => {
                    if let Some(closed) = self.open(header) {
                        return Some(closed);
                    }
                }
                LineKind::FamilyAnchor(id) => {
                    // Visible text on an anchor line is still content
                    self.current_family = Some(id);
                    self.push_content(line);
                }
                LineKind::Ordinary => self.push_content(line),
            }
        }

        let trailing = self.finish();
        match self.options.trailing_record {
            TrailingRecord::Emit => trailing,
            TrailingRecord::Drop => {
                if let Some(person) = trailing {
                    debug!(name = %person.name, "Dropping person open at end of input");
                }
                None
            }
        }
    }
}
