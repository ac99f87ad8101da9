//! YAML output and read-back of family files.

mod reader;
mod writer;

use serde::{Deserialize, Serialize};

use crate::types::PersonEntry;

pub use reader::{extract_people, read_families, read_family};
pub use writer::{generate_yaml, save_yaml};

/// One family file: the people of a household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyFile {
    #[serde(rename = "People")]
    pub people: Vec<PersonEntry>,
}
