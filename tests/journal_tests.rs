//! Tests for the Journal CRUD engine
//!
//! These tests verify:
//! - Monotonic id assignment, never reused after deletes
//! - Sparse-patch update semantics
//! - All-or-nothing mark appends
//! - Persist-after-mutation and reload fidelity
//! - Not-found and validation error reporting

use std::fs;
use std::path::PathBuf;

use gradebook::{GradebookError, Journal, StudentPatch};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_journal() -> (TempDir, Journal) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");
    let journal = Journal::open_path(&path).unwrap();
    (temp_dir, journal)
}

fn data_file(journal: &Journal) -> PathBuf {
    journal.config().data_file.clone()
}

// =============================================================================
// Id Assignment Tests
// =============================================================================

#[test]
fn test_ids_are_strictly_increasing() {
    let (_temp, mut journal) = setup_journal();

    let a = journal.create("Ann", None, None).unwrap();
    let b = journal.create("Bo", None, None).unwrap();
    let c = journal.create("Cy", None, None).unwrap();

    assert_eq!((a.id, b.id, c.id), (1, 2, 3));
}

#[test]
fn test_ids_not_reused_after_delete() {
    let (_temp, mut journal) = setup_journal();

    let ann = journal.create("Ann", Some(vec![3, 4]), Some(String::new())).unwrap();
    assert_eq!(ann.id, 1);

    let bo = journal.create("Bo", None, None).unwrap();
    assert_eq!(bo.id, 2);
    assert_eq!(bo.marks, Vec::<u8>::new());
    assert_eq!(bo.info, "");

    journal.delete(1).unwrap();

    let cy = journal.create("Cy", None, None).unwrap();
    assert_eq!(cy.id, 3);
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_rejects_blank_name_without_mutation() {
    let (_temp, mut journal) = setup_journal();

    let err = journal.create("   ", None, None).unwrap_err();
    assert!(matches!(err, GradebookError::Validation(_)));
    assert!(journal.is_empty());
}

#[test]
fn test_create_normalizes_missing_fields() {
    let (_temp, mut journal) = setup_journal();

    let student = journal.create("Ann", None, None).unwrap();

    assert_eq!(student.marks, Vec::<u8>::new());
    assert_eq!(student.info, "");
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_empty_patch_is_a_noop() {
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", Some(vec![4, 5]), Some("22 y.o.".into())).unwrap();
    let before = journal.get(1).unwrap().clone();

    let after = journal.update(1, &StudentPatch::new()).unwrap();

    assert_eq!(after, before);
}

#[test]
fn test_patch_with_missing_marks_leaves_marks_unchanged() {
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", Some(vec![4, 5]), None).unwrap();

    let after = journal.update(1, &StudentPatch::new().name("Anna")).unwrap();

    assert_eq!(after.name, "Anna");
    assert_eq!(after.marks, vec![4, 5]);
}

#[test]
fn test_patch_with_empty_marks_leaves_marks_unchanged() {
    // Empty is treated as "not supplied"; marks cannot be cleared here
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", Some(vec![4, 5]), None).unwrap();

    let after = journal.update(1, &StudentPatch::new().marks(vec![])).unwrap();

    assert_eq!(after.marks, vec![4, 5]);
}

#[test]
fn test_update_unknown_id_reports_not_found() {
    let (_temp, mut journal) = setup_journal();

    let err = journal.update(9, &StudentPatch::new().name("X")).unwrap_err();
    assert!(matches!(err, GradebookError::NotFound(9)));
}

// =============================================================================
// Mark Append Tests
// =============================================================================

#[test]
fn test_append_marks_extends_in_order() {
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", Some(vec![4, 5]), None).unwrap();

    let after = journal.append_marks(1, &[1, 5, 3]).unwrap();

    assert_eq!(after.marks, vec![4, 5, 1, 5, 3]);
}

#[test]
fn test_append_marks_rejects_whole_batch_on_one_bad_mark() {
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", Some(vec![4, 5]), None).unwrap();

    let err = journal.append_marks(1, &[0, 5]).unwrap_err();
    assert!(matches!(err, GradebookError::Validation(_)));
    assert_eq!(journal.get(1).unwrap().marks, vec![4, 5]);
}

#[test]
fn test_append_marks_unknown_id_reports_not_found() {
    let (_temp, mut journal) = setup_journal();

    let err = journal.append_marks(7, &[3]).unwrap_err();
    assert!(matches!(err, GradebookError::NotFound(7)));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_unknown_id_leaves_store_and_file_untouched() {
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", Some(vec![4]), None).unwrap();
    let file_before = fs::read_to_string(data_file(&journal)).unwrap();

    let err = journal.delete(9).unwrap_err();
    assert!(matches!(err, GradebookError::NotFound(9)));

    assert_eq!(journal.len(), 1);
    let file_after = fs::read_to_string(data_file(&journal)).unwrap();
    assert_eq!(file_after, file_before);
}

// =============================================================================
// Save Failure Tests
// =============================================================================

#[test]
fn test_failed_persist_reports_save_failed_and_keeps_memory() {
    let temp_dir = TempDir::new().unwrap();

    // A regular file where the data file's parent directory should be
    // makes every persist fail while the store itself works fine
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("students.csv");

    let mut journal = Journal::open_path(&path).unwrap();
    assert!(journal.load_report().file_missing);

    let err = journal.create("Ann", Some(vec![4, 5]), None).unwrap_err();
    assert!(matches!(err, GradebookError::SaveFailed(_)));

    // The in-memory mutation is not rolled back; memory is ahead of disk
    assert_eq!(journal.len(), 1);
    let ann = journal.get(1).unwrap();
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.marks, vec![4, 5]);
    assert!(!path.exists());
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_get_unknown_id_reports_not_found() {
    let (_temp, journal) = setup_journal();

    assert!(matches!(journal.get(1), Err(GradebookError::NotFound(1))));
}

#[test]
fn test_list_is_id_ordered_and_restartable() {
    let (_temp, mut journal) = setup_journal();

    journal.create("Ann", None, None).unwrap();
    journal.create("Bo", None, None).unwrap();

    let names: Vec<&str> = journal.list().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bo"]);

    // Listing again has no side effects and yields the same sequence
    let names: Vec<&str> = journal.list().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bo"]);
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_records_survive_reopen_bit_compatible() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");

    let originals = {
        let mut journal = Journal::open_path(&path).unwrap();
        journal.create("John Doe", Some(vec![4, 5, 1, 4, 5, 2, 5]), Some("John is 22 y.o.".into())).unwrap();
        journal.create("Mary Black", Some(vec![4, 1, 3, 4, 5, 1, 2, 2]), Some("Mary is 23 y.o.".into())).unwrap();
        journal.create("No Marks", None, None).unwrap();
        journal.list().cloned().collect::<Vec<_>>()
    };

    let journal = Journal::open_path(&path).unwrap();
    let reloaded: Vec<_> = journal.list().cloned().collect();

    assert_eq!(reloaded, originals);
    assert_eq!(journal.load_report().rows_loaded, 3);
    assert_eq!(journal.load_report().rows_skipped, 0);
}

#[test]
fn test_reopen_continues_id_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.csv");

    {
        let mut journal = Journal::open_path(&path).unwrap();
        journal.create("Ann", None, None).unwrap();
        journal.create("Bo", None, None).unwrap();
    }

    let mut journal = Journal::open_path(&path).unwrap();
    let cy = journal.create("Cy", None, None).unwrap();
    assert_eq!(cy.id, 3);
}

#[test]
fn test_open_missing_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.csv");

    let journal = Journal::open_path(&path).unwrap();

    assert!(journal.is_empty());
    assert!(journal.load_report().file_missing);
}
