use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[project]
name = "stream-video-android"
version = "1.4.0"

[coverage]
included-modules = ["core", "ui"]

[publishing]
description = "Stream Video SDK for Android"

[[module]]
name = "core"
type = "android-library"

[[module]]
name = "ui"
type = "android-library"
plugins = ["app.cash.paparazzi"]

[[module]]
name = "bom"
type = "java-platform"
"#;

#[allow(deprecated)]
fn konvent_cmd() -> Command {
    let mut cmd = Command::cargo_bin("konvent").unwrap();
    cmd.env_remove("SNAPSHOT")
        .env_remove("SONAR_TOKEN")
        .env_remove("KONVENT_PROJECT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Konvent.toml"), MANIFEST).unwrap();
    tmp
}

#[test]
fn test_graph_tree() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::contains(":testCoverage (finalized by"))
        .stdout(predicate::str::contains(":ui:verifyPaparazziDebug"));
}

#[test]
fn test_graph_order() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .args(["graph", "--order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5. :testCoverage"));
}

#[test]
fn test_artifacts_list() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .arg("artifacts")
        .assert()
        .success()
        .stdout(predicate::str::contains("io.getstream:core:1.4.0"))
        .stdout(predicate::str::contains("io.getstream:bom:1.4.0"));
}

#[test]
fn test_artifacts_snapshot_from_env() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .env("SNAPSHOT", "TRUE")
        .arg("artifacts")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"io\.getstream:core:1\.4\.0-\d{12}-SNAPSHOT").unwrap());
}

#[test]
fn test_artifacts_snapshot_from_env_file() {
    let tmp = project();
    fs::write(tmp.path().join(".konvent.env"), "SNAPSHOT=true\n").unwrap();
    konvent_cmd()
        .current_dir(tmp.path())
        .arg("artifacts")
        .assert()
        .success()
        .stdout(predicate::str::contains("-SNAPSHOT"));
}

#[test]
fn test_artifacts_pom() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .args(["artifacts", "--pom", "bom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<packaging>pom</packaging>"))
        .stdout(predicate::str::contains(
            "<url>https://github.com/GetStream/stream-video-android</url>",
        ));
}

#[test]
fn test_license_generates_then_fresh() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .arg("license")
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"));
    assert!(tmp.path().join("build/spotless-config/license.kt").is_file());
    assert!(tmp.path().join("build/spotless-config/license.xml").is_file());

    konvent_cmd()
        .current_dir(tmp.path())
        .arg("license")
        .assert()
        .success()
        .stderr(predicate::str::contains("Fresh"));
}

#[test]
fn test_env_masks_values() {
    let tmp = project();
    fs::write(tmp.path().join(".konvent.env"), "SONAR_TOKEN=s3cret\n").unwrap();
    konvent_cmd()
        .current_dir(tmp.path())
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("SONAR_TOKEN = ********"))
        .stdout(predicate::str::contains("s3cret").not());

    konvent_cmd()
        .current_dir(tmp.path())
        .args(["env", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SONAR_TOKEN = s3cret"));
}

#[test]
fn test_env_without_file() {
    let tmp = project();
    konvent_cmd()
        .current_dir(tmp.path())
        .arg("env")
        .assert()
        .success()
        .stdout(predicate::str::contains("No environment variables configured."));
}
