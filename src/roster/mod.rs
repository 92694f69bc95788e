//! Roster Module
//!
//! In-memory collection of student records.
//!
//! ## Responsibilities
//! - Own the authoritative id → record mapping for the process lifetime
//! - Assign monotonically increasing ids, never reused after deletion
//! - Stable id-ordered iteration for display
//!
//! ## Data Structure Choice
//! BTreeMap keyed by id: iteration order is id order, which equals
//! insertion order because ids only ever grow.

mod table;

pub use table::Roster;
