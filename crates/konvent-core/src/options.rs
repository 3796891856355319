//! The global options model.
//!
//! Options are collected once (from `Konvent.toml` or through
//! [`GlobalOptionsBuilder`]), validated, and then only ever read. The resolver
//! receives them by reference for a whole pass.

use globset::Glob;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use konvent_util::errors::KonventError;

/// GitHub organization used to derive repository URLs.
pub const DEFAULT_GITHUB_ORGANIZATION: &str = "GetStream";

/// License name written into published POMs.
pub const DEFAULT_LICENSE_NAME: &str = "Stream License";

/// Formatter options from `[spotless]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SpotlessOptions {
    /// Use ktfmt instead of ktlint for Kotlin sources.
    pub use_ktfmt: bool,
    /// Modules that are never formatted.
    pub ignored_modules: BTreeSet<String>,
    /// Globs excluded from formatting on top of the build-output defaults.
    pub exclude_patterns: BTreeSet<String>,
}

/// Coverage options from `[coverage]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CoverageOptions {
    /// Modules whose tests feed the aggregated coverage report.
    pub included_modules: BTreeSet<String>,
    /// Extra Kover class filters, e.g. `*SomeClass` or `io.getstream.some.package.*`.
    pub kover_class_exclusions: Vec<String>,
    /// Extra Sonar file-path exclusions, e.g. `**/io/getstream/some/package/**`.
    pub sonar_coverage_exclusions: Vec<String>,
}

/// A developer entry for published POMs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Publishing options from `[publishing]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishingOptions {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub module_artifact_id_overrides: BTreeMap<String, String>,
    #[serde(default = "default_github_organization")]
    pub github_organization: String,
    #[serde(default = "default_license_name")]
    pub license_name: String,
    /// Developers listed in every POM. An explicit list replaces the
    /// Stream maintainers.
    #[serde(default = "default_developers")]
    pub developers: Vec<Developer>,
}

impl Default for PublishingOptions {
    fn default() -> Self {
        Self {
            description: None,
            module_artifact_id_overrides: BTreeMap::new(),
            github_organization: default_github_organization(),
            license_name: default_license_name(),
            developers: default_developers(),
        }
    }
}

fn default_github_organization() -> String {
    DEFAULT_GITHUB_ORGANIZATION.to_string()
}

fn default_license_name() -> String {
    DEFAULT_LICENSE_NAME.to_string()
}

/// `(id, name, email)` of the maintainers published by default.
pub const DEFAULT_DEVELOPERS: [(&str, &str, &str); 6] = [
    (
        "aleksandar-apostolov",
        "Aleksandar Apostolov",
        "aleksandar.apostolov@getstream.io",
    ),
    ("VelikovPetar", "Petar Velikov", "petar.velikov@getstream.io"),
    ("andremion", "André Mion", "andre.rego@getstream.io"),
    ("rahul-lohra", "Rahul Kumar Lohra", "rahul.lohra@getstream.io"),
    ("PratimMallick", "Pratim Mallick", "pratim.mallick@getstream.io"),
    ("gpunto", "Gianmarco David", "gianmarco.david@getstream.io"),
];

fn default_developers() -> Vec<Developer> {
    DEFAULT_DEVELOPERS
        .iter()
        .map(|(id, name, email)| Developer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
        })
        .collect()
}

/// Project-wide options shared by every module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Repository name, used for license headers, POM URLs and Sonar keys.
    pub repository_name: Option<String>,
    pub spotless: SpotlessOptions,
    pub coverage: CoverageOptions,
    pub publishing: PublishingOptions,
    /// Custom Kotlin/Java license template replacing the bundled one.
    pub license_template: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn builder() -> GlobalOptionsBuilder {
        GlobalOptionsBuilder::default()
    }

    /// The repository name, or `MissingRequiredOption` when a derived value needs it.
    pub fn require_repository_name(&self) -> miette::Result<&str> {
        self.repository_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                KonventError::MissingRequiredOption {
                    option: "repository-name".to_string(),
                }
                .into()
            })
    }

    /// Check pattern syntax and override values.
    pub fn validate(&self) -> miette::Result<()> {
        validate_globs("spotless.exclude-patterns", &self.spotless.exclude_patterns)?;
        validate_globs(
            "coverage.kover-class-exclusions",
            &self.coverage.kover_class_exclusions,
        )?;
        validate_globs(
            "coverage.sonar-coverage-exclusions",
            &self.coverage.sonar_coverage_exclusions,
        )?;
        for (module, artifact_id) in &self.publishing.module_artifact_id_overrides {
            if artifact_id.trim().is_empty() {
                return Err(KonventError::Manifest {
                    message: format!(
                        "publishing.module-artifact-id-overrides.{module} must not be empty"
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}

fn validate_globs<'a>(
    option: &str,
    patterns: impl IntoIterator<Item = &'a String>,
) -> miette::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).map_err(|e| KonventError::InvalidPattern {
            option: option.to_string(),
            pattern: pattern.clone(),
            message: e.kind().to_string(),
        })?;
    }
    Ok(())
}

/// Collects options and validates them once in [`GlobalOptionsBuilder::build`].
#[derive(Debug, Default)]
pub struct GlobalOptionsBuilder {
    options: GlobalOptions,
    developers: Option<Vec<Developer>>,
}

impl GlobalOptionsBuilder {
    pub fn repository_name(mut self, name: impl Into<String>) -> Self {
        self.options.repository_name = Some(name.into());
        self
    }

    pub fn use_ktfmt(mut self, enabled: bool) -> Self {
        self.options.spotless.use_ktfmt = enabled;
        self
    }

    pub fn ignore_formatting_for(mut self, module: impl Into<String>) -> Self {
        self.options.spotless.ignored_modules.insert(module.into());
        self
    }

    pub fn format_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.options.spotless.exclude_patterns.insert(pattern.into());
        self
    }

    pub fn include_in_coverage(mut self, module: impl Into<String>) -> Self {
        self.options.coverage.included_modules.insert(module.into());
        self
    }

    pub fn kover_class_exclusion(mut self, pattern: impl Into<String>) -> Self {
        self.options.coverage.kover_class_exclusions.push(pattern.into());
        self
    }

    pub fn sonar_coverage_exclusion(mut self, pattern: impl Into<String>) -> Self {
        self.options
            .coverage
            .sonar_coverage_exclusions
            .push(pattern.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.options.publishing.description = Some(description.into());
        self
    }

    pub fn artifact_id_override(
        mut self,
        module: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        self.options
            .publishing
            .module_artifact_id_overrides
            .insert(module.into(), artifact_id.into());
        self
    }

    pub fn github_organization(mut self, organization: impl Into<String>) -> Self {
        self.options.publishing.github_organization = organization.into();
        self
    }

    /// Add a developer. The first call drops the default maintainers.
    pub fn developer(mut self, developer: Developer) -> Self {
        self.developers.get_or_insert_with(Vec::new).push(developer);
        self
    }

    pub fn license_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.license_template = Some(path.into());
        self
    }

    pub fn spotless(mut self, spotless: SpotlessOptions) -> Self {
        self.options.spotless = spotless;
        self
    }

    pub fn coverage(mut self, coverage: CoverageOptions) -> Self {
        self.options.coverage = coverage;
        self
    }

    pub fn publishing(mut self, publishing: PublishingOptions) -> Self {
        self.options.publishing = publishing;
        self
    }

    /// Validate and freeze the options.
    pub fn build(mut self) -> miette::Result<GlobalOptions> {
        if let Some(developers) = self.developers {
            self.options.publishing.developers = developers;
        }
        self.options.validate()?;
        Ok(self.options)
    }
}
