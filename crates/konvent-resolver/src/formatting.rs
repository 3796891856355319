//! Formatter conventions (Spotless) and the license-header support tasks.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use konvent_core::module::ModuleDescriptor;
use konvent_core::options::{GlobalOptions, SpotlessOptions};
use konvent_core::template::{KOTLIN_LICENSE_TEMPLATE, XML_LICENSE_TEMPLATE};

use crate::registry::{TaskRegistry, TaskSpec};

pub const KTLINT_VERSION: &str = "0.50.0";

/// Globs that are never formatted.
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 2] = ["**/build/**/*.kt", "**/build/**/*.xml"];

pub const DETEKT_BASELINE: &str = "**/detekt-baseline.xml";

/// Where the XML license header stops matching: the first element that is
/// not a comment or processing instruction.
pub const XML_LICENSE_DELIMITER: &str = "(<[^!?])";

/// Root-relative directory holding the generated license headers.
pub const LICENSE_OUTPUT_DIR: &str = "build/spotless-config";
pub const KOTLIN_LICENSE_FILE: &str = "license.kt";
pub const XML_LICENSE_FILE: &str = "license.xml";

pub const GENERATE_KOTLIN_LICENSE_TASK: &str = "generateKotlinLicenseHeader";
pub const GENERATE_XML_LICENSE_TASK: &str = "generateXmlLicenseHeader";

/// Which Kotlin formatter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatterChoice {
    Ktlint,
    Ktfmt,
}

impl FormatterChoice {
    pub fn from_options(options: &SpotlessOptions) -> Self {
        if options.use_ktfmt {
            Self::Ktfmt
        } else {
            Self::Ktlint
        }
    }
}

/// One formatter step within a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum FormatStep {
    Ktlint {
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<&'static str>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        editorconfig_override: BTreeMap<&'static str, &'static str>,
    },
    Ktfmt {
        style: &'static str,
    },
    ImportOrder,
    RemoveUnusedImports,
    GoogleJavaFormat,
    TrimTrailingWhitespace,
    EndWithNewline,
    LicenseHeader {
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        delimiter: Option<&'static str>,
    },
}

impl FormatStep {
    fn kotlin_formatter(choice: FormatterChoice) -> Self {
        match choice {
            FormatterChoice::Ktfmt => Self::Ktfmt { style: "kotlinlang" },
            FormatterChoice::Ktlint => Self::Ktlint {
                version: Some(KTLINT_VERSION),
                editorconfig_override: BTreeMap::from([(
                    "ktlint_standard_max-line-length",
                    "disabled",
                )]),
            },
        }
    }
}

/// A Spotless format target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormatTarget {
    pub name: &'static str,
    /// Empty means the formatter's default source set.
    pub includes: Vec<String>,
    pub excludes: BTreeSet<String>,
    pub steps: Vec<FormatStep>,
}

/// Formatting setup for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormattingPlan {
    pub formatter: FormatterChoice,
    /// Defaults, global patterns and module patterns, unioned.
    pub exclude_patterns: BTreeSet<String>,
    pub targets: Vec<FormatTarget>,
    pub kotlin_license_file: String,
    pub xml_license_file: String,
    /// Root tasks every `spotless*` task of the module depends on.
    pub support_tasks: Vec<TaskSpec>,
}

/// Formatting applies unless the module opts out or is globally ignored.
pub fn formatting_enabled(module: &ModuleDescriptor, options: &GlobalOptions) -> bool {
    !module.flags.disable_formatting && !options.spotless.ignored_modules.contains(&module.name)
}

fn license_output(file: &str) -> String {
    format!("{LICENSE_OUTPUT_DIR}/{file}")
}

/// The two root tasks that render license headers for `repository_name`.
pub fn license_tasks(repository_name: &str) -> [TaskSpec; 2] {
    let task = |name: &str, template: &str, file: &str| {
        TaskSpec::new(TaskSpec::root_path(name))
            .description(format!("Generate {file} from the {template} template"))
            .input("repository-name", repository_name)
            .input("template", template)
            .input("output", license_output(file))
    };
    [
        task(
            GENERATE_KOTLIN_LICENSE_TASK,
            KOTLIN_LICENSE_TEMPLATE,
            KOTLIN_LICENSE_FILE,
        ),
        task(
            GENERATE_XML_LICENSE_TASK,
            XML_LICENSE_TEMPLATE,
            XML_LICENSE_FILE,
        ),
    ]
}

/// Build the formatting plan, or `None` when formatting is off for the module.
pub fn plan(
    module: &ModuleDescriptor,
    options: &GlobalOptions,
) -> miette::Result<Option<FormattingPlan>> {
    if !formatting_enabled(module, options) {
        tracing::debug!(module = %module.name, "formatting disabled");
        return Ok(None);
    }
    let repository_name = options.require_repository_name()?;
    let formatter = FormatterChoice::from_options(&options.spotless);

    let exclude_patterns: BTreeSet<String> = DEFAULT_EXCLUDE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .chain(options.spotless.exclude_patterns.iter().cloned())
        .chain(module.format_exclude.iter().cloned())
        .collect();

    let kotlin_license_file = license_output(KOTLIN_LICENSE_FILE);
    let xml_license_file = license_output(XML_LICENSE_FILE);
    let kotlin_header = FormatStep::LicenseHeader {
        file: kotlin_license_file.clone(),
        delimiter: None,
    };

    let mut xml_excludes = exclude_patterns.clone();
    xml_excludes.insert(DETEKT_BASELINE.to_string());

    let targets = vec![
        FormatTarget {
            name: "kotlin",
            includes: vec!["**/*.kt".to_string()],
            excludes: exclude_patterns.clone(),
            steps: vec![
                FormatStep::kotlin_formatter(formatter),
                FormatStep::TrimTrailingWhitespace,
                FormatStep::EndWithNewline,
                kotlin_header.clone(),
            ],
        },
        FormatTarget {
            name: "java",
            includes: Vec::new(),
            excludes: exclude_patterns.clone(),
            steps: vec![
                FormatStep::ImportOrder,
                FormatStep::RemoveUnusedImports,
                FormatStep::GoogleJavaFormat,
                FormatStep::TrimTrailingWhitespace,
                FormatStep::EndWithNewline,
                kotlin_header,
            ],
        },
        FormatTarget {
            name: "kotlinGradle",
            includes: vec!["*.gradle.kts".to_string()],
            excludes: BTreeSet::new(),
            steps: vec![
                FormatStep::Ktlint {
                    version: None,
                    editorconfig_override: BTreeMap::new(),
                },
                FormatStep::TrimTrailingWhitespace,
                FormatStep::EndWithNewline,
            ],
        },
        FormatTarget {
            name: "xml",
            includes: vec!["**/*.xml".to_string()],
            excludes: xml_excludes,
            steps: vec![FormatStep::LicenseHeader {
                file: xml_license_file.clone(),
                delimiter: Some(XML_LICENSE_DELIMITER),
            }],
        },
    ];

    Ok(Some(FormattingPlan {
        formatter,
        exclude_patterns,
        targets,
        kotlin_license_file,
        xml_license_file,
        support_tasks: license_tasks(repository_name).to_vec(),
    }))
}

/// Register the support tasks requested by every formatting plan.
///
/// The same root task is requested by every formatted module; the registry
/// keeps one copy.
pub fn register_support_tasks<'a>(
    registry: &mut TaskRegistry,
    plans: impl IntoIterator<Item = &'a FormattingPlan>,
) -> miette::Result<()> {
    for plan in plans {
        for task in &plan.support_tasks {
            registry.register(task.clone())?;
        }
    }
    Ok(())
}
