//! Backing file reader
//!
//! Parses the CSV file into records, row by row. A row that fails to
//! parse (non-integer id, non-integer mark token) is skipped and noted in
//! the report; it never aborts the rest of the load.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::record::Student;

use super::RawRow;

/// Result of loading the backing file
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of rows successfully parsed into records
    pub rows_loaded: u64,

    /// Number of rows skipped due to parse errors
    pub rows_skipped: u64,

    /// One entry per skipped row
    pub errors: Vec<RowError>,

    /// Whether the backing file was absent (empty store, non-fatal)
    pub file_missing: bool,
}

/// A single unreadable row
#[derive(Debug)]
pub struct RowError {
    /// 1-based line number in the backing file
    pub line: u64,

    /// What failed to parse
    pub reason: String,
}

/// Read the backing file into an id → record mapping plus a load report
///
/// A missing file yields an empty mapping with `file_missing` set; this
/// is the normal first run, not an error. I/O and header-level CSV
/// failures are real errors and abort the load.
pub fn read(path: &Path) -> Result<(BTreeMap<u32, Student>, LoadReport)> {
    let mut report = LoadReport::default();

    if !path.exists() {
        tracing::debug!("Backing file {} not found, starting empty", path.display());
        report.file_missing = true;
        return Ok((BTreeMap::new(), report));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = BTreeMap::new();

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                // Malformed CSV row (bad quoting, wrong field count)
                report.skip(line_of(&e), format!("unreadable row: {}", e));
                continue;
            }
        };

        let line = row.position().map_or(0, |p| p.line());

        let raw: RawRow = match row.deserialize(Some(&headers)) {
            Ok(raw) => raw,
            Err(e) => {
                report.skip(line, format!("row does not match header: {}", e));
                continue;
            }
        };

        match parse_row(&raw) {
            Ok(student) => {
                records.insert(student.id, student);
                report.rows_loaded += 1;
            }
            Err(reason) => report.skip(line, reason),
        }
    }

    Ok((records, report))
}

/// Coerce one raw row into a record
///
/// The name is kept verbatim; an empty marks cell means no marks.
fn parse_row(raw: &RawRow) -> std::result::Result<Student, String> {
    let id: u32 = raw
        .id
        .trim()
        .parse()
        .map_err(|_| format!("invalid id {:?}", raw.id))?;

    let marks = parse_marks(&raw.marks)?;

    Ok(Student {
        id,
        name: raw.name.clone(),
        marks,
        info: raw.info.clone(),
    })
}

/// Parse a comma-joined marks cell
fn parse_marks(cell: &str) -> std::result::Result<Vec<u8>, String> {
    cell.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| format!("invalid mark {:?}", token))
        })
        .collect()
}

impl LoadReport {
    fn skip(&mut self, line: u64, reason: String) {
        tracing::warn!("Skipping row at line {}: {}", line, reason);
        self.rows_skipped += 1;
        self.errors.push(RowError { line, reason });
    }
}

/// Best-effort line number from a csv-level error
fn line_of(e: &csv::Error) -> u64 {
    e.position().map_or(0, |p| p.line())
}
