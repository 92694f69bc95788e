//! Student record types
//!
//! ## Responsibilities
//! - Define the record shape shared by the roster and the persistence layer
//! - Normalize optional fields (marks, info) to empty, never missing
//! - Validate names and mark values
//! - Describe sparse update payloads

use crate::error::{GradebookError, Result};

/// Lowest mark a student can receive
pub const MIN_MARK: u8 = 1;

/// Highest mark a student can receive
pub const MAX_MARK: u8 = 5;

/// One student's stored data
///
/// `marks` and `info` are always present; records constructed from sparse
/// input are normalized to an empty vec / empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Positive, unique within the store, immutable after creation
    pub id: u32,

    /// Non-empty after trimming
    pub name: String,

    /// Ordered marks, duplicates allowed, may be empty
    pub marks: Vec<u8>,

    /// Free text, may be empty
    pub info: String,
}

impl Student {
    /// Build a record with normalized fields
    ///
    /// Fails with a validation error if `name` is empty after trimming.
    /// `marks`/`info` default to empty when not supplied.
    pub fn new(
        id: u32,
        name: &str,
        marks: Option<Vec<u8>>,
        info: Option<String>,
    ) -> Result<Self> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name,
            marks: marks.unwrap_or_default(),
            info: info.unwrap_or_default(),
        })
    }
}

/// Sparse update payload for an existing record
///
/// A field is applied only when it is supplied AND non-empty: `name`
/// must trim to something, `marks` and `info` must not be empty. An
/// explicitly empty marks list is treated the same as "not supplied",
/// which means marks cannot be cleared through an update; observed
/// behavior of the format, kept as-is rather than guessed at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub marks: Option<Vec<u8>>,
    pub info: Option<String>,
}

impl StudentPatch {
    /// Create an empty patch (applies nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the replacement marks
    pub fn marks(mut self, marks: Vec<u8>) -> Self {
        self.marks = Some(marks);
        self
    }

    /// Set the replacement info text
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Whether the patch would change anything under the sparse rules
    pub fn is_empty(&self) -> bool {
        !self.name.as_ref().is_some_and(|n| !n.trim().is_empty())
            && !self.marks.as_ref().is_some_and(|m| !m.is_empty())
            && !self.info.as_ref().is_some_and(|i| !i.is_empty())
    }

    /// Apply the patch to a record in place, sparse rules as documented
    pub(crate) fn apply(&self, student: &mut Student) {
        if let Some(name) = self.name.as_ref() {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                student.name = trimmed.to_string();
            }
        }
        if let Some(marks) = self.marks.as_ref() {
            if !marks.is_empty() {
                student.marks = marks.clone();
            }
        }
        if let Some(info) = self.info.as_ref() {
            if !info.is_empty() {
                student.info = info.clone();
            }
        }
    }
}

/// Trim and validate a student name
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GradebookError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Check a batch of marks against the allowed range
///
/// All-or-nothing: one out-of-range value rejects the whole batch.
pub fn validate_marks(marks: &[u8]) -> Result<()> {
    if let Some(bad) = marks
        .iter()
        .find(|&&m| !(MIN_MARK..=MAX_MARK).contains(&m))
    {
        return Err(GradebookError::Validation(format!(
            "mark {} out of range {}..={}",
            bad, MIN_MARK, MAX_MARK
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_missing_fields() {
        let s = Student::new(1, "Ann", None, None).unwrap();
        assert_eq!(s.marks, Vec::<u8>::new());
        assert_eq!(s.info, "");
    }

    #[test]
    fn new_trims_name() {
        let s = Student::new(1, "  Ann  ", None, None).unwrap();
        assert_eq!(s.name, "Ann");
    }

    #[test]
    fn new_rejects_blank_name() {
        assert!(Student::new(1, "   ", None, None).is_err());
    }

    #[test]
    fn patch_skips_empty_fields() {
        let mut s = Student::new(1, "Ann", Some(vec![4, 5]), Some("note".into())).unwrap();
        let before = s.clone();

        StudentPatch::new().name("").marks(vec![]).info("").apply(&mut s);

        assert_eq!(s, before);
    }

    #[test]
    fn patch_applies_supplied_fields() {
        let mut s = Student::new(1, "Ann", Some(vec![4]), None).unwrap();

        StudentPatch::new().name("Anna").marks(vec![5, 5]).apply(&mut s);

        assert_eq!(s.name, "Anna");
        assert_eq!(s.marks, vec![5, 5]);
        assert_eq!(s.info, "");
    }

    #[test]
    fn patch_emptiness_follows_sparse_rules() {
        assert!(StudentPatch::new().is_empty());
        assert!(StudentPatch::new().name("  ").marks(vec![]).info("").is_empty());
        assert!(!StudentPatch::new().name("Ann").is_empty());
        assert!(!StudentPatch::new().marks(vec![5]).is_empty());
    }

    #[test]
    fn marks_batch_is_all_or_nothing() {
        assert!(validate_marks(&[1, 5, 3]).is_ok());
        assert!(validate_marks(&[0, 5]).is_err());
        assert!(validate_marks(&[6]).is_err());
        assert!(validate_marks(&[]).is_ok());
    }
}
