//! Roster implementation
//!
//! BTreeMap-based record table. No internal synchronization; callers in a
//! multi-threaded front end must guard the whole roster with one lock.

use std::collections::BTreeMap;

use crate::record::Student;

/// In-memory table of student records
#[derive(Debug, Default)]
pub struct Roster {
    records: BTreeMap<u32, Student>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from already-parsed records (used by load)
    pub fn from_records(records: BTreeMap<u32, Student>) -> Self {
        Self { records }
    }

    /// Next id to assign: max existing + 1, or 1 when empty
    ///
    /// Saturates at `u32::MAX` so a hand-edited backing file with the
    /// maximum id cannot overflow the counter.
    pub fn next_id(&self) -> u32 {
        self.records
            .keys()
            .next_back()
            .map_or(1, |&id| id.saturating_add(1))
    }

    /// Look up a record by id
    pub fn get(&self, id: u32) -> Option<&Student> {
        self.records.get(&id)
    }

    /// Mutable lookup, for in-place patching
    pub fn get_mut(&mut self, id: u32) -> Option<&mut Student> {
        self.records.get_mut(&id)
    }

    /// Insert a record under its own id, returning any displaced record
    pub fn insert(&mut self, student: Student) -> Option<Student> {
        self.records.insert(student.id, student)
    }

    /// Remove a record, returning it if present
    pub fn remove(&mut self, id: u32) -> Option<Student> {
        self.records.remove(&id)
    }

    /// Iterate records in id order; restartable, no side effects
    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.records.values()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
