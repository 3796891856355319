//! Per-module convention resolution.
//!
//! [`resolve`] is a pure function of one module descriptor and the global
//! options. It runs the conventions in a fixed order (compile, formatting,
//! coverage, publishing) and fails on the first inconsistency.

use serde::Serialize;

use konvent_core::capability::{Capability, CapabilitySet};
use konvent_core::manifest::ProjectManifest;
use konvent_core::module::{AndroidSettings, ModuleDescriptor, ModuleType};
use konvent_core::options::GlobalOptions;
use konvent_util::errors::KonventError;

use crate::classify::{capabilities, classify};
use crate::compile::{self, CompileConvention};
use crate::coverage::{coverage_enabled, CoveragePlan};
use crate::formatting::{self, FormatterChoice, FormattingPlan};

/// Publication shape for a publishable module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishDescriptor {
    /// Single-variant Android library (`release`).
    AndroidLibrary,
    /// Kotlin/JVM library with Dokka javadoc.
    KotlinLibrary,
    /// Java platform (BOM).
    #[serde(rename = "platform")]
    PlatformDescriptor,
}

/// Android extension settings after applying module-type rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AndroidConvention {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_sdk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sdk: Option<u32>,
    /// Where `target_sdk` is set: test options and lint for libraries,
    /// `defaultConfig` for applications.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_sdk_applies_to: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
}

/// Everything derived for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedConfiguration {
    pub module: String,
    pub module_type: ModuleType,
    pub capabilities: CapabilitySet,
    pub compile: CompileConvention,
    pub formatter: FormatterChoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingPlan>,
    pub analysis_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoveragePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_descriptor: Option<PublishDescriptor>,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConvention>,
}

impl ResolvedConfiguration {
    pub fn formatting_enabled(&self) -> bool {
        self.formatting.is_some()
    }

    /// The Kover variant the module contributes to, if covered.
    pub fn coverage_variant(&self) -> Option<&str> {
        self.coverage.as_ref().map(|c| c.variant)
    }

    /// Names of the configuration steps applied, in application order.
    pub fn steps(&self) -> Vec<&'static str> {
        let mut steps = vec!["java"];
        if self.compile.kotlin_jvm_target.is_some() {
            steps.push("kotlin");
        }
        if self.compile.android_unit_tests.is_some() {
            steps.push("android");
        }
        if self.formatting.is_some() {
            steps.push("spotless");
        }
        if self.coverage.is_some() {
            steps.push("kover");
            steps.push("sonar");
        }
        if self.publish_descriptor.is_some() {
            steps.push("publishing");
        }
        steps
    }
}

/// Artifact id precedence: global override map, module override, module name.
pub fn artifact_id(module: &ModuleDescriptor, options: &GlobalOptions) -> String {
    options
        .publishing
        .module_artifact_id_overrides
        .get(&module.name)
        .or(module.artifact_id_override.as_ref())
        .cloned()
        .unwrap_or_else(|| module.name.clone())
}

/// The publication shape, or `None` when publishing is off.
pub fn publish_descriptor(
    module: &ModuleDescriptor,
    module_type: ModuleType,
) -> miette::Result<Option<PublishDescriptor>> {
    if !module.flags.publishing_enabled {
        if module_type.is_publishable() {
            tracing::info!("publishing disabled for module '{}'", module.name);
        }
        return Ok(None);
    }
    let descriptor = match module_type {
        ModuleType::Library => PublishDescriptor::AndroidLibrary,
        ModuleType::JavaLibrary => PublishDescriptor::KotlinLibrary,
        ModuleType::JavaPlatform => PublishDescriptor::PlatformDescriptor,
        ModuleType::Application | ModuleType::Test => {
            return Err(KonventError::UnpublishableModule {
                module: module.name.clone(),
                module_type: module_type.to_string(),
            }
            .into())
        }
    };
    Ok(Some(descriptor))
}

fn android_convention(
    module: &ModuleDescriptor,
    capabilities: &CapabilitySet,
) -> Option<AndroidConvention> {
    let settings: &AndroidSettings = module.android.as_ref()?;
    let is_app = capabilities.contains(Capability::AndroidApplication);
    let is_lib = capabilities.contains(Capability::AndroidLibrary);
    if !is_app && !is_lib && !capabilities.contains(Capability::AndroidTest) {
        tracing::warn!(
            "ignoring [module.android] on non-Android module '{}'",
            module.name
        );
        return None;
    }

    let target_sdk_applies_to = if is_lib {
        vec!["testOptions", "lint"]
    } else if is_app {
        vec!["defaultConfig"]
    } else {
        Vec::new()
    };
    let target_sdk = settings
        .target_sdk
        .filter(|_| !target_sdk_applies_to.is_empty());
    if settings.target_sdk.is_some() && target_sdk.is_none() {
        tracing::debug!("target-sdk has no effect on module '{}'", module.name);
    }

    let version_name = if is_app {
        settings.version_name.clone()
    } else {
        if settings.version_name.is_some() {
            tracing::debug!(
                "version-name only applies to applications; ignored for '{}'",
                module.name
            );
        }
        None
    };

    Some(AndroidConvention {
        compile_sdk: settings.compile_sdk,
        min_sdk: settings.min_sdk,
        target_sdk,
        target_sdk_applies_to,
        version_name,
    })
}

/// Resolve the conventions for one module.
pub fn resolve(
    module: &ModuleDescriptor,
    options: &GlobalOptions,
) -> miette::Result<ResolvedConfiguration> {
    let module_type = classify(module)?;
    let capabilities = capabilities(module)?;

    let compile = compile::convention(&capabilities);
    let formatter = FormatterChoice::from_options(&options.spotless);
    let formatting = formatting::plan(module, options)?;
    let analysis_enabled = coverage_enabled(module, options)?;
    let coverage =
        analysis_enabled.then(|| CoveragePlan::new(&capabilities, &options.coverage));
    let publish_descriptor = publish_descriptor(module, module_type)?;
    let android = android_convention(module, &capabilities);

    let resolved = ResolvedConfiguration {
        module: module.name.clone(),
        module_type,
        artifact_id: artifact_id(module, options),
        capabilities,
        compile,
        formatter,
        formatting,
        analysis_enabled,
        coverage,
        publish_descriptor,
        android,
    };
    tracing::debug!(
        module = %resolved.module,
        steps = ?resolved.steps(),
        "resolved conventions"
    );
    Ok(resolved)
}

/// Resolve every module in declaration order, stopping at the first error.
pub fn resolve_all(manifest: &ProjectManifest) -> miette::Result<Vec<ResolvedConfiguration>> {
    manifest
        .modules()
        .iter()
        .map(|module| resolve(module, manifest.options()))
        .collect()
}
