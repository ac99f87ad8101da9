//! Core data types for the extractor.
//!
//! A [`PersonRecord`] is one husband, wife or child as introduced by a
//! header line on a family page, together with every content line that
//! followed it. Records are plain owned values, built fresh per person.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractorError, Result};

/// How a person relates to the household that introduced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Introduced by a `Husband ...` line.
    Husband,

    /// Introduced by a `Wife ...` line.
    Wife,

    /// Introduced by a `<digit> <M|F> ...` line.
    Child,
}

impl Relation {
    /// Get the string value used in serialized records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Child => "child",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = ExtractorError;

    /// Parse a serialized relation.
    ///
    /// # Examples
    /// ```
    /// use family_extractor::types::Relation;
    ///
    /// assert_eq!("wife".parse::<Relation>().unwrap(), Relation::Wife);
    /// assert!("cousin".parse::<Relation>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "husband" => Ok(Self::Husband),
            "wife" => Ok(Self::Wife),
            "child" => Ok(Self::Child),
            other => Err(ExtractorError::UnsupportedRelation(other.to_string())),
        }
    }
}

/// One parsed content line attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFragment {
    /// Label before the first colon, if the line had one.
    pub key: Option<String>,

    /// Text after the first colon, or the whole line without a colon.
    pub value: String,

    /// First link on the line.
    pub href: Option<String>,
}

/// A person read from a family page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    /// Relation to the household header.
    pub relation: Relation,

    /// Display name with the relation marker removed.
    pub name: String,

    /// First link on the header line.
    pub link: Option<String>,

    /// Family anchor in effect when the header was read; empty if none.
    pub family: String,

    /// Page the record came from; empty until the corpus walker sets it.
    pub source: String,

    /// Content lines in page order.
    pub content: Vec<ContentFragment>,
}

impl PersonRecord {
    /// Create a record with no content, family or source.
    #[must_use]
    pub fn new(relation: Relation, name: impl Into<String>, link: Option<String>) -> Self {
        Self {
            relation,
            name: name.into(),
            link,
            family: String::new(),
            source: String::new(),
            content: Vec::new(),
        }
    }

    /// Set the enclosing family.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Set the originating page.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Append a content fragment.
    pub fn push_content(&mut self, fragment: ContentFragment) {
        self.content.push(fragment);
    }

    /// Identity used to match a record against the family index.
    ///
    /// # Examples
    /// ```
    /// use family_extractor::types::{PersonRecord, Relation};
    ///
    /// let person = PersonRecord::new(Relation::Wife, "Jane", None)
    ///     .with_family("f12")
    ///     .with_source("f1.htm");
    /// assert_eq!(person.family_key(), "f1.htm#f12");
    /// ```
    #[must_use]
    pub fn family_key(&self) -> String {
        format!("{}#{}", self.source, self.family)
    }

    /// Project into the serializable entry shape.
    #[must_use]
    pub fn to_entry(&self) -> PersonEntry {
        PersonEntry {
            link: self.link.clone(),
            name: self.name.clone(),
            relation: self.relation.as_str().to_string(),
            family: self.family.clone(),
            content: self.content.clone(),
        }
    }
}

impl fmt::Display for PersonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

/// Serialized form of a person, as stored in family YAML files.
///
/// `relation` stays a string here so that read-back of hand-edited files
/// can reject unknown relations with a proper error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub link: Option<String>,
    pub name: String,
    pub relation: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub content: Vec<ContentFragment>,
}

impl PersonEntry {
    /// Rebuild a record, validating the relation.
    ///
    /// # Errors
    /// `ExtractorError::UnsupportedRelation` if `relation` is not one of
    /// husband, wife or child.
    pub fn to_record(&self) -> Result<PersonRecord> {
        let relation = self.relation.parse::<Relation>()?;
        Ok(PersonRecord {
            relation,
            name: self.name.clone(),
            link: self.link.clone(),
            family: self.family.clone(),
            source: String::new(),
            content: self.content.clone(),
        })
    }
}
