//! Persistence Module
//!
//! Serializes the full roster to a comma-delimited text file and reads it
//! back on startup.
//!
//! ## Responsibilities
//! - Parse the backing CSV into id → record, skipping unreadable rows
//! - Report skipped rows instead of failing the whole load
//! - Rewrite the file atomically (write to temp, rename over destination)
//!
//! ## File Format
//! ```text
//! ID,Name,Marks,Info
//! 1,John Doe,"4,5,1,4,5,2,5",John is 22 y.o.
//! 2,Mary Black,"4,1,3,4,5,1,2,2",Mary is 23 y.o.
//! ```
//! The header row is mandatory and fixed. `Marks` is one cell of
//! comma-joined integers; an empty cell means no marks. Fields containing
//! the delimiter are quoted per standard CSV rules.

mod reader;
mod writer;

pub use reader::{read, LoadReport, RowError};
pub use writer::write;

use serde::{Deserialize, Serialize};

/// Column names of the mandatory header row
pub const HEADER: [&str; 4] = ["ID", "Name", "Marks", "Info"];

/// One row of the backing file, before/after field coercion
///
/// All fields are strings at this level; turning `id` and `marks` into
/// integers (and back) is the reader's/writer's job so that a malformed
/// row can be skipped and reported individually.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawRow {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Marks")]
    pub marks: String,

    #[serde(rename = "Info")]
    pub info: String,
}
