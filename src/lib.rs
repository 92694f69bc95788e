//! # Gradebook
//!
//! A single-user student record store with:
//! - In-memory roster keyed by monotonically assigned ids
//! - Full CSV persistence after every mutation
//! - Sparse-patch updates and validated mark appends
//! - Row-level parse error recovery on load
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Interactive CLI                          │
//! │            (parses raw input, renders errors)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ typed arguments
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Journal                               │
//! │         (CRUD, validation, persist-after-mutation)          │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!     ┌─────────────┐               ┌─────────────┐
//!     │   Roster    │               │   Persist   │
//!     │  (BTreeMap) │               │ (CSV file)  │
//!     └─────────────┘               └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod roster;
pub mod persist;
pub mod journal;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GradebookError, Result};
pub use config::Config;
pub use journal::Journal;
pub use record::{Student, StudentPatch, MAX_MARK, MIN_MARK};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the gradebook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
