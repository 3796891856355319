use std::path::Path;

use chrono::{TimeZone, Utc};
use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;
use konvent_resolver::sonar::SonarPlan;

fn manifest(included: &str) -> ProjectManifest {
    ProjectManifest::parse_toml(&format!(
        r#"
[project]
name = "stream-chat-android"
version = "1.0.0"

[coverage]
included-modules = [{included}]
sonar-coverage-exclusions = ["**/io/getstream/generated/**"]

[[module]]
name = "core"
type = "android-library"
"#
    ))
    .unwrap()
}

fn env(token: Option<&str>) -> BuildEnvironment {
    let mut env = BuildEnvironment::release(Utc.with_ymd_and_hms(2025, 3, 1, 10, 5, 0).unwrap());
    env.sonar_token = token.map(String::from);
    env
}

#[test]
fn no_plan_without_coverage() {
    assert!(SonarPlan::for_project(&manifest(""), Path::new("/repo"), &env(None))
        .unwrap()
        .is_none());
}

#[test]
fn plan_properties() {
    let plan = SonarPlan::for_project(&manifest(r#""core""#), Path::new("/repo"), &env(None))
        .unwrap()
        .unwrap();
    let props = plan.properties();
    assert_eq!(props["sonar.projectKey"], "GetStream_stream-chat-android");
    assert_eq!(props["sonar.projectName"], "stream-chat-android");
    assert_eq!(props["sonar.organization"], "getstream");
    assert_eq!(props["sonar.java.binaries"], "/repo/**/build/tmp/kotlin-classes/debug");
    assert!(props["sonar.coverage.exclusions"].starts_with("**/test/**,**/androidTest/**"));
    assert!(props["sonar.coverage.exclusions"].ends_with(",**/io/getstream/generated/**"));
    assert!(!props.contains_key("sonar.token"));
    assert!(!plan.token_configured);
}

#[test]
fn token_is_never_printed() {
    let plan = SonarPlan::for_project(
        &manifest(r#""core""#),
        Path::new("/repo"),
        &env(Some("s3cret-value")),
    )
    .unwrap()
    .unwrap();
    assert_eq!(plan.properties()["sonar.token"], "***");
    assert!(!format!("{plan:?}").contains("s3cret-value"));
    assert!(!serde_json::to_string(&plan).unwrap().contains("s3cret-value"));
    assert_eq!(plan.token.as_ref().unwrap().expose(), "s3cret-value");
}
