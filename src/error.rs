//! Error types for the gradebook
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using GradebookError
pub type Result<T> = std::result::Result<T, GradebookError>;

/// Unified error type for gradebook operations
#[derive(Debug, Error)]
pub enum GradebookError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory mutation succeeded but rewriting the backing file did
    /// not. Memory and disk may diverge until the next successful persist.
    #[error("save failed, in-memory state not rolled back: {0}")]
    SaveFailed(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("student {0} not found")]
    NotFound(u32),

    #[error("validation error: {0}")]
    Validation(String),
}
