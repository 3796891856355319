use std::collections::BTreeSet;

use konvent_core::manifest::ProjectManifest;
use konvent_resolver::graph::build_graph;

fn manifest(included: &str) -> ProjectManifest {
    ProjectManifest::parse_toml(&format!(
        r#"
[project]
name = "acme-android"
version = "1.0.0"

[coverage]
included-modules = [{included}]

[[module]]
name = "core"
type = "android-library"

[[module]]
name = "ui"
type = "android-library"
plugins = ["app.cash.paparazzi"]

[[module]]
name = "models"
type = "java-library"

[[module]]
name = "sample"
type = "android-application"
"#
    ))
    .unwrap()
}

#[test]
fn empty_coverage_set_registers_nothing() {
    let graph = build_graph(&manifest("")).unwrap();
    assert!(graph.is_empty());
    assert!(graph.root_task().is_none());
    assert!(graph.root_dependencies().is_empty());
    assert!(graph.execution_order().is_empty());
}

#[test]
fn root_depends_exactly_on_included_modules() {
    let graph = build_graph(&manifest(r#""core", "ui", "models""#)).unwrap();
    let expected: BTreeSet<String> = ["core", "ui", "models"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(graph.root_dependencies(), expected);

    let root = graph.root_task().unwrap();
    assert_eq!(root.group.as_deref(), Some("verification"));
    assert_eq!(
        root.finalized_by,
        vec![":koverXmlReportCoverage", ":koverHtmlReportCoverage"]
    );
    assert!(graph.task(":sample:testCoverage").is_none());
}

#[test]
fn module_tasks_depend_on_runner() {
    let graph = build_graph(&manifest(r#""core", "ui", "models""#)).unwrap();
    assert_eq!(
        graph.prerequisites_of(":core:testCoverage"),
        vec![":core:testDebugUnitTest"]
    );
    assert_eq!(
        graph.prerequisites_of(":ui:testCoverage"),
        vec![":ui:verifyPaparazziDebug"]
    );
    assert_eq!(
        graph.prerequisites_of(":models:testCoverage"),
        vec![":models:test"]
    );
}

#[test]
fn execution_order_puts_prerequisites_first() {
    let graph = build_graph(&manifest(r#""core""#)).unwrap();
    let order = graph.execution_order();
    let pos = |task: &str| order.iter().position(|t| *t == task).unwrap();
    assert!(pos(":core:testDebugUnitTest") < pos(":core:testCoverage"));
    assert!(pos(":core:testCoverage") < pos(":testCoverage"));
    assert_eq!(order.len(), 3);
}

#[test]
fn unknown_included_module_is_skipped() {
    let graph = build_graph(&manifest(r#""core", "ghost""#)).unwrap();
    let expected: BTreeSet<String> = ["core".to_string()].into_iter().collect();
    assert_eq!(graph.root_dependencies(), expected);
}

#[test]
fn only_unknown_modules_means_no_root_task() {
    let graph = build_graph(&manifest(r#""ghost""#)).unwrap();
    assert!(graph.root_task().is_none());
}

#[test]
fn inconsistent_flag_fails_graph_build() {
    let manifest = ProjectManifest::parse_toml(
        r#"
[project]
name = "acme"
version = "1.0.0"

[[module]]
name = "core"
type = "android-library"
coverage = true
"#,
    )
    .unwrap();
    assert!(build_graph(&manifest).is_err());
}

#[test]
fn building_twice_is_identical() {
    let m = manifest(r#""core", "ui""#);
    let a = build_graph(&m).unwrap();
    let b = build_graph(&m).unwrap();
    assert_eq!(a.registry(), b.registry());
    assert_eq!(a.execution_order(), b.execution_order());
}

#[test]
fn tree_rendering() {
    let graph = build_graph(&manifest(r#""core", "ui""#)).unwrap();
    let tree = graph.print_tree();
    assert!(tree.starts_with(":testCoverage (finalized by"));
    assert!(tree.contains("├── :core:testCoverage"));
    assert!(tree.contains("│   └── :core:testDebugUnitTest"));
    assert!(tree.contains("└── :ui:testCoverage"));
    assert!(tree.contains("    └── :ui:verifyPaparazziDebug"));
}
