use konvent_util::errors::KonventError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = KonventError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = KonventError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_unknown_module_type_names_module_and_tag() {
    let err = KonventError::UnknownModuleType {
        module: "core".to_string(),
        tag: "android-dynamic-feature".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Module 'core' has unknown type 'android-dynamic-feature'"
    );
}

#[test]
fn test_inconsistent_coverage_display() {
    let err = KonventError::InconsistentCoverageConfig {
        module: "ui".to_string(),
        flag: true,
        listed: false,
    };
    let msg = err.to_string();
    assert!(msg.contains("'ui'"), "got: {msg}");
    assert!(msg.contains("module flag is true"), "got: {msg}");
    assert!(msg.contains("included-modules is false"), "got: {msg}");
}

#[test]
fn test_unpublishable_module_display() {
    let err = KonventError::UnpublishableModule {
        module: "sample".to_string(),
        module_type: "android-application".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Module 'sample' of type android-application cannot be published"
    );
}

#[test]
fn test_task_redefinition_display() {
    let err = KonventError::TaskRedefinition {
        task: ":testCoverage".to_string(),
        existing: "a".to_string(),
        requested: "b".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Task ':testCoverage' is already registered with different parameters"
    );
}

#[test]
fn test_missing_required_option_display() {
    let err = KonventError::MissingRequiredOption {
        option: "repository-name".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Required option 'repository-name' is not configured"
    );
}

#[test]
fn test_missing_template_display() {
    let err = KonventError::MissingTemplateResource {
        name: "license-header.md".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Could not find license template 'license-header.md'"
    );
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: KonventError = io_err.into();
    assert!(matches!(err, KonventError::Io(_)));
}
