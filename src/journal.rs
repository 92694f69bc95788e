//! Journal Module
//!
//! The CRUD engine that coordinates the roster and the persistence layer.
//!
//! ## Responsibilities
//! - Load the backing file into a fresh roster at startup
//! - Validate and apply mutations (create/update/delete/append marks)
//! - Persist the full roster synchronously after every mutation
//!
//! ## Durability Contract
//! Every successful mutation rewrites the whole backing file before the
//! operation returns. If that rewrite fails, the operation returns
//! `SaveFailed` but the in-memory mutation stays applied; memory and disk
//! diverge until the next successful persist. There is no retry.

use std::path::Path;

use crate::config::Config;
use crate::error::{GradebookError, Result};
use crate::persist::{self, LoadReport};
use crate::record::{validate_marks, Student, StudentPatch};
use crate::roster::Roster;

/// The record store: owns the roster for the process lifetime
///
/// Single-threaded by design. All mutations take `&mut self`; a
/// multi-threaded front end must guard the whole journal with one lock.
pub struct Journal {
    /// Engine configuration
    config: Config,

    /// Authoritative in-memory records
    roster: Roster,

    /// What happened during the startup load
    load_report: LoadReport,
}

impl Journal {
    /// Open a journal, loading the backing file into a fresh roster
    ///
    /// A missing file means an empty store, not an error. Rows that fail
    /// to parse are skipped; the rest of the file still loads, and the
    /// skips are available through [`Journal::load_report`].
    pub fn open(config: Config) -> Result<Self> {
        let (records, report) = persist::read(&config.data_file)?;

        if report.rows_skipped > 0 {
            tracing::warn!(
                "Load: {} rows loaded, {} skipped from {}",
                report.rows_loaded,
                report.rows_skipped,
                config.data_file.display()
            );
        } else {
            tracing::debug!(
                "Load: {} rows loaded from {}",
                report.rows_loaded,
                config.data_file.display()
            );
        }

        Ok(Self {
            config,
            roster: Roster::from_records(records),
            load_report: report,
        })
    }

    /// Open with a path (convenience method)
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Iterate all records in id order; restartable, no side effects
    pub fn list(&self) -> impl Iterator<Item = &Student> {
        self.roster.iter()
    }

    /// Get a record by id
    pub fn get(&self, id: u32) -> Result<&Student> {
        self.roster.get(id).ok_or(GradebookError::NotFound(id))
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Create a record, assigning the next id
    ///
    /// `name` must be non-empty after trimming; `marks`/`info` default to
    /// empty. Returns the created record. Validation failure performs no
    /// mutation.
    pub fn create(
        &mut self,
        name: &str,
        marks: Option<Vec<u8>>,
        info: Option<String>,
    ) -> Result<Student> {
        let student = Student::new(self.roster.next_id(), name, marks, info)?;
        let created = student.clone();

        tracing::debug!("Creating student {} ({})", created.id, created.name);
        self.roster.insert(student);
        self.persist()?;

        Ok(created)
    }

    /// Apply a sparse patch to an existing record
    ///
    /// Only supplied non-empty fields are applied; see [`StudentPatch`].
    /// Returns the updated record, or `NotFound` with the store unchanged.
    pub fn update(&mut self, id: u32, patch: &StudentPatch) -> Result<Student> {
        let student = self
            .roster
            .get_mut(id)
            .ok_or(GradebookError::NotFound(id))?;

        patch.apply(student);
        let updated = student.clone();

        self.persist()?;
        Ok(updated)
    }

    /// Delete a record by id
    ///
    /// Returns the removed record; `NotFound` leaves store and file
    /// untouched.
    pub fn delete(&mut self, id: u32) -> Result<Student> {
        let removed = self
            .roster
            .remove(id)
            .ok_or(GradebookError::NotFound(id))?;

        tracing::debug!("Deleted student {} ({})", removed.id, removed.name);
        self.persist()?;
        Ok(removed)
    }

    /// Append a batch of marks to an existing record
    ///
    /// All-or-nothing: every mark must be in range, or the whole batch is
    /// rejected and the record is untouched. On success the batch goes to
    /// the end of the existing sequence in order.
    pub fn append_marks(&mut self, id: u32, marks: &[u8]) -> Result<Student> {
        let student = self
            .roster
            .get_mut(id)
            .ok_or(GradebookError::NotFound(id))?;

        validate_marks(marks)?;
        student.marks.extend_from_slice(marks);
        let updated = student.clone();

        self.persist()?;
        Ok(updated)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// What the startup load found (rows loaded/skipped, missing file)
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Rewrite the backing file from the current roster
    ///
    /// Failure is surfaced as `SaveFailed`; the in-memory mutation that
    /// triggered this persist is NOT rolled back.
    fn persist(&self) -> Result<()> {
        persist::write(&self.config.data_file, self.roster.iter()).map_err(|e| {
            tracing::warn!(
                "Persist to {} failed: {}; in-memory state now ahead of disk",
                self.config.data_file.display(),
                e
            );
            GradebookError::SaveFailed(e.to_string())
        })
    }
}
