//! Root Sonar quality-gate plan.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;

pub const SONAR_HOST_URL: &str = "https://sonarcloud.io";
pub const SONAR_ORGANIZATION: &str = "getstream";

pub const DEFAULT_COVERAGE_EXCLUSIONS: [&str; 8] = [
    "**/test/**",
    "**/androidTest/**",
    "**/R.class",
    "**/R2.class",
    "**/R$*.class",
    "**/BuildConfig.*",
    "**/Manifest*.*",
    "**/*Test*.*",
];

/// Merged Kover report produced by the root `testCoverage` task.
pub const MERGED_COVERAGE_REPORT: &str = "build/reports/kover/reportCoverage.xml";

/// A Sonar token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SonarToken(String);

impl SonarToken {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SonarToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SonarToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SonarPlan {
    pub host_url: &'static str,
    pub organization: &'static str,
    pub project_key: String,
    pub project_name: String,
    pub coverage_plugin: &'static str,
    pub source_encoding: &'static str,
    pub java_binaries: String,
    pub coverage_exclusions: Vec<String>,
    pub coverage_report: &'static str,
    #[serde(skip)]
    pub token: Option<SonarToken>,
    pub token_configured: bool,
}

impl SonarPlan {
    /// Build the plan when at least one declared module is included in
    /// coverage; `None` otherwise.
    pub fn for_project(
        manifest: &ProjectManifest,
        root_dir: &Path,
        env: &BuildEnvironment,
    ) -> miette::Result<Option<Self>> {
        let options = manifest.options();
        let any_included = options
            .coverage
            .included_modules
            .iter()
            .any(|name| manifest.contains(name));
        if !any_included {
            return Ok(None);
        }
        let repository_name = options.require_repository_name()?;

        let token = env.sonar_token.clone().map(SonarToken);
        if token.is_none() {
            tracing::info!("SONAR_TOKEN not set; sonar.token will be omitted");
        }

        let coverage_exclusions = DEFAULT_COVERAGE_EXCLUSIONS
            .iter()
            .map(|s| s.to_string())
            .chain(options.coverage.sonar_coverage_exclusions.iter().cloned())
            .collect();

        Ok(Some(Self {
            host_url: SONAR_HOST_URL,
            organization: SONAR_ORGANIZATION,
            project_key: format!("GetStream_{repository_name}"),
            project_name: repository_name.to_string(),
            coverage_plugin: "jacoco",
            source_encoding: "UTF-8",
            java_binaries: format!(
                "{}/**/build/tmp/kotlin-classes/debug",
                root_dir.display()
            ),
            coverage_exclusions,
            coverage_report: MERGED_COVERAGE_REPORT,
            token_configured: token.is_some(),
            token,
        }))
    }

    /// The `sonar.*` properties. The token value is masked.
    pub fn properties(&self) -> BTreeMap<&'static str, String> {
        let mut props = BTreeMap::from([
            ("sonar.host.url", self.host_url.to_string()),
            ("sonar.organization", self.organization.to_string()),
            ("sonar.projectKey", self.project_key.clone()),
            ("sonar.projectName", self.project_name.clone()),
            ("sonar.java.coveragePlugin", self.coverage_plugin.to_string()),
            ("sonar.sourceEncoding", self.source_encoding.to_string()),
            ("sonar.java.binaries", self.java_binaries.clone()),
            ("sonar.coverage.exclusions", self.coverage_exclusions.join(",")),
            (
                "sonar.coverage.jacoco.xmlReportPaths",
                self.coverage_report.to_string(),
            ),
        ]);
        if self.token.is_some() {
            props.insert("sonar.token", "***".to_string());
        }
        props
    }
}
