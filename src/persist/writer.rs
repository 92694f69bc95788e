//! Backing file writer
//!
//! Rewrites the whole backing file from the in-memory roster. The new
//! contents go to a temp file next to the destination, then rename over
//! it, so a reader never observes a truncated file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::Student;

use super::{RawRow, HEADER};

/// Serialize every record to `path`, one CSV row per record
///
/// The header row is written unconditionally, even for an empty roster.
pub fn write<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Student>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);

    // Header is written explicitly so an empty roster still produces it
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp)?;

    writer.write_record(HEADER)?;

    for student in records {
        writer.serialize(RawRow {
            id: student.id.to_string(),
            name: student.name.clone(),
            marks: join_marks(&student.marks),
            info: student.info.clone(),
        })?;
    }

    writer.flush()?;
    drop(writer);

    // Atomic replace from the caller's perspective
    fs::rename(&tmp, path)?;

    tracing::debug!("Persisted roster to {}", path.display());
    Ok(())
}

/// Join marks into the single comma-separated cell
///
/// An empty sequence serializes as an empty field.
fn join_marks(marks: &[u8]) -> String {
    marks
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Temp file sitting next to the destination, same filesystem for rename
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
