use konvent_core::properties::{interpolate, load_env_file};
use std::collections::BTreeMap;
use tempfile::TempDir;

#[test]
fn load_env_file_missing_is_empty() {
    let tmp = TempDir::new().unwrap();
    let vars = load_env_file(&tmp.path().join(".konvent.env")).unwrap();
    assert!(vars.is_empty());
}

#[test]
fn load_env_file_parses_entries() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".konvent.env");
    std::fs::write(
        &path,
        "# secrets\n\nSONAR_TOKEN=abc123\nexport SNAPSHOT=true\nQUOTED=\"with spaces\"\nSINGLE='x'\nbroken line\n",
    )
    .unwrap();
    let vars = load_env_file(&path).unwrap();
    assert_eq!(vars.get("SONAR_TOKEN").map(String::as_str), Some("abc123"));
    assert_eq!(vars.get("SNAPSHOT").map(String::as_str), Some("true"));
    assert_eq!(vars.get("QUOTED").map(String::as_str), Some("with spaces"));
    assert_eq!(vars.get("SINGLE").map(String::as_str), Some("x"));
    assert_eq!(vars.len(), 4);
}

#[test]
fn interpolate_uses_overrides() {
    let mut vars = BTreeMap::new();
    vars.insert("KONVENT_TEST_REPO".to_string(), "acme-lib".to_string());
    assert_eq!(
        interpolate("name = \"${env:KONVENT_TEST_REPO}\"", &vars),
        "name = \"acme-lib\""
    );
}

#[test]
fn interpolate_default_value() {
    let vars = BTreeMap::new();
    assert_eq!(
        interpolate("${env:KONVENT_TEST_SURELY_UNSET:-fallback}", &vars),
        "fallback"
    );
}

#[test]
fn interpolate_unresolved_becomes_empty() {
    let vars = BTreeMap::new();
    assert_eq!(interpolate("a${env:KONVENT_TEST_SURELY_UNSET}b", &vars), "ab");
}

#[test]
fn interpolate_multiple_references() {
    let mut vars = BTreeMap::new();
    vars.insert("A".to_string(), "1".to_string());
    vars.insert("B".to_string(), "2".to_string());
    assert_eq!(interpolate("${env:A}-${env:B}-${env:A}", &vars), "1-2-1");
}

#[test]
fn interpolate_unterminated_reference_left_alone() {
    let vars = BTreeMap::new();
    assert_eq!(interpolate("x ${env:OPEN", &vars), "x ${env:OPEN");
}
