use std::fs;
use ownlib_client::{ensure_state_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_state_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn state_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("occupied");
    fs::write(&file_path, "x").unwrap();
    let err = ensure_state_dir(&file_path).unwrap_err();
    assert!(matches!(err, PersistError::StateDir(_)));
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("session.ron", "(a)").unwrap();
    assert_eq!(first.file_name().unwrap(), "session.ron");
    assert_eq!(fs::read_to_string(&first).unwrap(), "(a)");

    let second = writer.write("session.ron", "(b)").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(b)");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("session.ron", "data").is_err());
    assert!(!file_path.with_file_name("session.ron").exists());
}

#[test]
fn remove_tolerates_missing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    writer.remove("session.ron").unwrap();
    let path = writer.write("session.ron", "(a)").unwrap();
    writer.remove("session.ron").unwrap();
    assert!(!path.exists());
}
