//! Read-back of family YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::FamilyFile;
use crate::error::{ExtractorError, Result};
use crate::types::PersonRecord;

/// Load one family file.
pub fn read_family(path: &Path) -> Result<FamilyFile> {
    let content = fs::read_to_string(path).map_err(|source| ExtractorError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml_ng::from_str(&content)?)
}

/// Load every `*.yaml` and `*.yml` file directly inside `root`.
///
/// Files are returned sorted by path.
pub fn read_families(root: &Path) -> Result<Vec<FamilyFile>> {
    let root = glob::Pattern::escape(&root.to_string_lossy());
    let mut paths = Vec::new();
    for extension in ["yaml", "yml"] {
        for entry in glob::glob(&format!("{root}/*.{extension}"))? {
            let path = entry.map_err(|e| ExtractorError::UnreadableFile {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "Reading family file");
            read_family(path)
        })
        .collect()
}

/// Flatten the people of all families into records.
///
/// # Errors
/// `ExtractorError::UnsupportedRelation` if any entry has a relation other
/// than husband, wife or child.
pub fn extract_people(families: &[FamilyFile]) -> Result<Vec<PersonRecord>> {
    families
        .iter()
        .flat_map(|family| &family.people)
        .map(|entry| entry.to_record())
        .collect()
}
