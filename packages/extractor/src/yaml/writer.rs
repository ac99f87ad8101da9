//! YAML writer for extracted people.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::FamilyFile;
use crate::error::Result;
use crate::types::PersonRecord;

/// Indent block sequences under their parent key.
///
/// serde_yaml_ng writes `- ` items at the same column as the key owning the
/// sequence; yamllint's `indent-sequences: true` wants them two columns in:
///
/// ```yaml
/// # Before:          # After:
/// People:            People:
/// - name: John         - name: John
///   content: []          content: []
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    // Columns at which currently open sequences put their dashes
    let mut open: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let body = line.trim_start();
        if body.is_empty() {
            out.push(String::new());
            continue;
        }
        let column = line.len() - body.len();
        let is_item = body.starts_with("- ") || body == "-";

        while let Some(&seq) = open.last() {
            if column < seq || (column == seq && !is_item) {
                open.pop();
            } else {
                break;
            }
        }
        if is_item && open.last() != Some(&column) {
            open.push(column);
        }

        out.push(format!("{}{body}", " ".repeat(column + open.len() * 2)));
    }

    out.join("\n")
}

/// Generate a family YAML document from records.
///
/// Records are written in the given order using the
/// [`to_entry`](PersonRecord::to_entry) projection.
pub fn generate_yaml<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let family = FamilyFile {
        people: records.into_iter().map(PersonRecord::to_entry).collect(),
    };
    let yaml = serde_yaml_ng::to_string(&family)?;
    let yaml = indent_yaml_sequences(&yaml);

    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Save records as a YAML file.
///
/// Writes to a temp file next to `path`, syncs, then renames, so a crash
/// never leaves a half-written file behind.
pub fn save_yaml<'a, I>(records: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a PersonRecord>,
{
    let content = generate_yaml(records)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "people.yaml".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}
