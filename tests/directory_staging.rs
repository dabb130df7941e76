// tests/directory_staging.rs

use std::fs;
use std::path::Path;

use stagehand::errors::StagehandError;
use stagehand::fs::mock::MockFileSystem;
use stagehand::fs::{FileSystem, RealFileSystem};
use stagehand::stage::DirectoryStager;
use stagehand_test_utils::{dir_entries, init_tracing};
use tempfile::TempDir;

#[test]
fn creates_missing_directory_including_parents() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("a").join("b").join("staged");

    DirectoryStager::new(&RealFileSystem).ensure_empty(&target).unwrap();

    assert!(target.is_dir());
    assert!(dir_entries(&target).is_empty());
}

#[test]
fn wipes_nested_contents_of_existing_directory() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("staged");
    fs::create_dir_all(target.join("nested/deeper")).unwrap();
    fs::write(target.join("top.txt"), b"stale").unwrap();
    fs::write(target.join("nested/deeper/file.bin"), b"stale").unwrap();

    DirectoryStager::new(&RealFileSystem).ensure_empty(&target).unwrap();

    assert!(target.is_dir());
    assert!(dir_entries(&target).is_empty());
}

#[test]
fn replaces_a_file_sitting_at_the_target_path() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("staged");
    fs::write(&target, b"not a directory").unwrap();

    DirectoryStager::new(&RealFileSystem).ensure_empty(&target).unwrap();

    assert!(target.is_dir());
}

#[test]
fn leaves_siblings_alone() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("staged");
    let sibling = tmp.path().join("keep.txt");
    fs::create_dir_all(&target).unwrap();
    fs::write(&sibling, b"keep me").unwrap();

    DirectoryStager::new(&RealFileSystem).ensure_empty(&target).unwrap();

    assert_eq!(fs::read(&sibling).unwrap(), b"keep me");
}

#[test]
fn mock_staging_removes_children() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/temp/old.log", b"old");
    fs.add_file("/work/temp/sub/inner.txt", b"inner");
    fs.add_file("/work/other.txt", b"other");

    let target = Path::new("/work/temp");
    DirectoryStager::new(&fs).ensure_empty(target).unwrap();

    assert!(fs.is_dir(target));
    assert!(fs.read_dir(target).unwrap().is_empty());
    assert!(!fs.exists(Path::new("/work/temp/sub/inner.txt")));
    assert!(fs.exists(Path::new("/work/other.txt")));
}

#[test]
fn denied_deletion_is_a_filesystem_error() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/temp/locked.dll", b"in use");
    fs.deny("/work/temp/locked.dll");

    let err = DirectoryStager::new(&fs)
        .ensure_empty(Path::new("/work/temp"))
        .unwrap_err();

    match err {
        StagehandError::Filesystem { path, .. } => assert_eq!(path, Path::new("/work/temp")),
        other => panic!("expected Filesystem error, got {other:?}"),
    }
    assert!(fs.exists(Path::new("/work/temp/locked.dll")));
}

#[test]
fn denied_creation_is_a_filesystem_error() {
    let fs = MockFileSystem::new();
    fs.deny("/readonly/temp");

    let err = DirectoryStager::new(&fs)
        .ensure_empty(Path::new("/readonly/temp"))
        .unwrap_err();

    assert!(matches!(err, StagehandError::Filesystem { .. }));
    assert!(!fs.exists(Path::new("/readonly/temp")));
}
