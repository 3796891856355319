use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use konvent_util::errors::KonventError;

use crate::module::{AndroidSettings, ModuleDescriptor, ModuleType};
use crate::options::{CoverageOptions, GlobalOptions, PublishingOptions, SpotlessOptions};
use crate::workspace::WorkspaceBuilder;

/// The whole build: project identity, modules in declaration order, and the
/// global options. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectManifest {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) group: String,
    pub(crate) modules: Vec<ModuleDescriptor>,
    pub(crate) options: GlobalOptions,
}

impl ProjectManifest {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Modules in declaration order.
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.module(name).is_some()
    }

    /// Load and parse a `Konvent.toml` file.
    ///
    /// `${env:VAR}` references are resolved from `.konvent.env` next to the
    /// manifest and then from the process environment. A relative
    /// `license-template` path is resolved against the manifest directory.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KonventError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars =
            crate::properties::load_env_file(&dir.join(crate::properties::ENV_FILE))?;
        let resolved = crate::properties::interpolate(&content, &env_vars);

        let file = ManifestFile::parse(&resolved)?;
        file.into_manifest(Some(dir))
    }

    /// Parse a `Konvent.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        ManifestFile::parse(content)?.into_manifest(None)
    }
}

/// On-disk shape of `Konvent.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestFile {
    pub project: ProjectSection,
    #[serde(default)]
    pub spotless: SpotlessOptions,
    #[serde(default)]
    pub coverage: CoverageOptions,
    #[serde(default)]
    pub publishing: PublishingOptions,
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleEntry>,
}

/// The `[project]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectSection {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub group: Option<String>,
    /// Defaults to the project name.
    #[serde(default)]
    pub repository_name: Option<String>,
    #[serde(default)]
    pub license_template: Option<PathBuf>,
}

/// One `[[module]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub disable_formatting: bool,
    /// Defaults to `true` for publishable module types.
    #[serde(default)]
    pub publish: Option<bool>,
    /// Defaults to membership in `coverage.included-modules`.
    #[serde(default)]
    pub coverage: Option<bool>,
    #[serde(default)]
    pub plugins: BTreeSet<String>,
    #[serde(default)]
    pub format_exclude: BTreeSet<String>,
    #[serde(default)]
    pub android: Option<AndroidSettings>,
}

impl ManifestFile {
    pub fn parse(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            KonventError::Manifest {
                message: format!("Failed to parse Konvent.toml: {e}"),
            }
            .into()
        })
    }

    /// Declare everything in this file on a [`WorkspaceBuilder`] and finish it.
    pub fn into_manifest(self, base_dir: Option<&Path>) -> miette::Result<ProjectManifest> {
        let project = self.project;
        if semver::Version::parse(&project.version).is_err() {
            tracing::warn!(
                "project version '{}' is not a semantic version",
                project.version
            );
        }

        let repository_name = project
            .repository_name
            .unwrap_or_else(|| project.name.clone());
        let license_template = project.license_template.map(|p| match base_dir {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p,
        });

        let mut options = GlobalOptions::builder()
            .repository_name(repository_name)
            .spotless(self.spotless)
            .coverage(self.coverage)
            .publishing(self.publishing);
        if let Some(path) = license_template {
            options = options.license_template(path);
        }
        let options = options.build()?;

        let mut builder = WorkspaceBuilder::new(&project.name, &project.version);
        if let Some(group) = project.group {
            builder.group(group);
        }
        for entry in self.modules {
            let listed = options.coverage.included_modules.contains(&entry.name);
            builder.declare_module(entry.into_descriptor(listed));
        }
        builder.options(options);
        builder.finish()
    }
}

impl ModuleEntry {
    fn into_descriptor(self, listed_for_coverage: bool) -> ModuleDescriptor {
        let publishable = ModuleType::parse(&self.kind)
            .map(|t| t.is_publishable())
            .unwrap_or(false);
        let mut module = ModuleDescriptor::with_kind(self.name, self.kind)
            .disable_formatting(self.disable_formatting)
            .publishing(self.publish.unwrap_or(publishable))
            .coverage(self.coverage.unwrap_or(listed_for_coverage));
        module.artifact_id_override = self.artifact_id;
        module.plugins = self.plugins;
        module.format_exclude = self.format_exclude;
        module.android = self.android;
        module
    }
}
