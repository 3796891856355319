use konvent_util::fs::{ensure_dir, find_ancestor_with, write_if_changed};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Konvent.toml"), "").unwrap();
    let result = find_ancestor_with(tmp.path(), "Konvent.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Konvent.toml"), "").unwrap();
    let nested = tmp.path().join("core").join("src").join("main");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&nested, "Konvent.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("build").join("spotless-config");
    assert!(!deep.exists());
    ensure_dir(&deep).unwrap();
    assert!(deep.is_dir());
}

#[test]
fn test_write_if_changed_creates_parents() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("build").join("license.kt");
    assert!(write_if_changed(&path, "header").unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "header");
}

#[test]
fn test_write_if_changed_skips_identical_content() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("license.kt");
    assert!(write_if_changed(&path, "header").unwrap());
    assert!(!write_if_changed(&path, "header").unwrap());
}

#[test]
fn test_write_if_changed_rewrites_different_content() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("license.kt");
    write_if_changed(&path, "2024").unwrap();
    assert!(write_if_changed(&path, "2025").unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "2025");
}
