use konvent_core::module::{ModuleDescriptor, ModuleType};
use konvent_core::options::GlobalOptions;
use konvent_resolver::formatting::{
    plan, register_support_tasks, FormatStep, FormatterChoice, GENERATE_KOTLIN_LICENSE_TASK,
};
use konvent_resolver::registry::{TaskRegistry, TaskSpec};

fn options() -> GlobalOptions {
    GlobalOptions::builder()
        .repository_name("acme-android")
        .format_exclude("**/generated/**")
        .build()
        .unwrap()
}

#[test]
fn exclusions_are_unioned() {
    let module = ModuleDescriptor::new("core", ModuleType::Library).format_exclude("**/legacy/**");
    let plan = plan(&module, &options()).unwrap().unwrap();
    for pattern in [
        "**/build/**/*.kt",
        "**/build/**/*.xml",
        "**/generated/**",
        "**/legacy/**",
    ] {
        assert!(plan.exclude_patterns.contains(pattern), "missing {pattern}");
    }
}

#[test]
fn four_targets_in_order() {
    let module = ModuleDescriptor::new("core", ModuleType::Library);
    let plan = plan(&module, &options()).unwrap().unwrap();
    let names: Vec<&str> = plan.targets.iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["kotlin", "java", "kotlinGradle", "xml"]);

    let xml = &plan.targets[3];
    assert!(xml.excludes.contains("**/detekt-baseline.xml"));
    assert_eq!(
        xml.steps,
        vec![FormatStep::LicenseHeader {
            file: "build/spotless-config/license.xml".to_string(),
            delimiter: Some("(<[^!?])"),
        }]
    );
}

#[test]
fn ktlint_is_pinned() {
    let module = ModuleDescriptor::new("core", ModuleType::Library);
    let plan = plan(&module, &options()).unwrap().unwrap();
    assert_eq!(plan.formatter, FormatterChoice::Ktlint);
    match &plan.targets[0].steps[0] {
        FormatStep::Ktlint {
            version,
            editorconfig_override,
        } => {
            assert_eq!(*version, Some("0.50.0"));
            assert_eq!(
                editorconfig_override.get("ktlint_standard_max-line-length"),
                Some(&"disabled")
            );
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn support_tasks_registered_once() {
    let a = plan(&ModuleDescriptor::new("a", ModuleType::Library), &options())
        .unwrap()
        .unwrap();
    let b = plan(&ModuleDescriptor::new("b", ModuleType::JavaLibrary), &options())
        .unwrap()
        .unwrap();
    let mut registry = TaskRegistry::new();
    register_support_tasks(&mut registry, [&a, &b]).unwrap();
    assert_eq!(registry.len(), 2);
    let task = registry
        .get(&TaskSpec::root_path(GENERATE_KOTLIN_LICENSE_TASK))
        .unwrap();
    assert_eq!(task.inputs["repository-name"], "acme-android");
    assert_eq!(task.inputs["output"], "build/spotless-config/license.kt");
}
