//! Coverage conventions: Kover variants, filters and per-module test runners.

use serde::Serialize;

use konvent_core::capability::{Capability, CapabilitySet};
use konvent_core::module::ModuleDescriptor;
use konvent_core::options::{CoverageOptions, GlobalOptions};
use konvent_util::errors::KonventError;

/// Kover variant every included module contributes to.
pub const COVERAGE_VARIANT: &str = "coverage";

/// Name of the per-module and root coverage tasks.
pub const COVERAGE_TASK: &str = "testCoverage";

pub const COVERAGE_TASK_GROUP: &str = "verification";

/// Report tasks that run after the aggregated coverage task.
pub const COVERAGE_REPORT_TASKS: [&str; 2] = ["koverXmlReportCoverage", "koverHtmlReportCoverage"];

pub const DEFAULT_CLASS_EXCLUSIONS: [&str; 5] =
    ["*R", "*R$*", "*BuildConfig", "*Manifest*", "*Composable*"];

pub const ANNOTATION_EXCLUSIONS: [&str; 1] = ["androidx.compose.ui.tooling.preview.Preview"];

/// Sources a module adds to the coverage variant (`jvm` and `debug`, both optional).
pub const VARIANT_SOURCES: [&str; 2] = ["jvm", "debug"];

pub const MODULE_JUNIT_REPORT_DIR: &str = "build/test-results/testDebugUnitTest";
pub const MODULE_COVERAGE_REPORT: &str = "build/reports/kover/reportDebug.xml";

/// Whether coverage applies to `module`.
///
/// The module's own flag and its membership in `coverage.included-modules`
/// must agree.
pub fn coverage_enabled(module: &ModuleDescriptor, options: &GlobalOptions) -> miette::Result<bool> {
    let flag = module.flags.included_in_coverage;
    let listed = options.coverage.included_modules.contains(&module.name);
    if flag != listed {
        return Err(KonventError::InconsistentCoverageConfig {
            module: module.name.clone(),
            flag,
            listed,
        }
        .into());
    }
    Ok(flag)
}

/// The task the module's `testCoverage` task runs.
pub fn runner_task(capabilities: &CapabilitySet) -> &'static str {
    if capabilities.contains(Capability::Paparazzi) {
        "verifyPaparazziDebug"
    } else if capabilities.has_android_build_types() {
        "testDebugUnitTest"
    } else {
        "test"
    }
}

/// Kover class filters: the defaults followed by the user's, in order.
pub fn class_exclusions(options: &CoverageOptions) -> Vec<String> {
    DEFAULT_CLASS_EXCLUSIONS
        .iter()
        .map(|s| s.to_string())
        .chain(options.kover_class_exclusions.iter().cloned())
        .collect()
}

/// Report locations Sonar reads for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleSonarPaths {
    pub junit_report_paths: &'static str,
    pub jacoco_xml_report_paths: &'static str,
}

/// Coverage setup for one included module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoveragePlan {
    pub variant: &'static str,
    pub variant_sources: Vec<&'static str>,
    pub class_exclusions: Vec<String>,
    pub annotation_exclusions: Vec<&'static str>,
    pub warning_instead_of_failure: bool,
    pub runner_task: &'static str,
    /// Unit-test and instrumented-test coverage on the `debug` build type.
    pub android_debug_coverage: bool,
    pub sonar: ModuleSonarPaths,
}

impl CoveragePlan {
    pub fn new(capabilities: &CapabilitySet, options: &CoverageOptions) -> Self {
        Self {
            variant: COVERAGE_VARIANT,
            variant_sources: VARIANT_SOURCES.to_vec(),
            class_exclusions: class_exclusions(options),
            annotation_exclusions: ANNOTATION_EXCLUSIONS.to_vec(),
            warning_instead_of_failure: true,
            runner_task: runner_task(capabilities),
            android_debug_coverage: capabilities.has_android_build_types(),
            sonar: ModuleSonarPaths {
                junit_report_paths: MODULE_JUNIT_REPORT_DIR,
                jacoco_xml_report_paths: MODULE_COVERAGE_REPORT,
            },
        }
    }
}
