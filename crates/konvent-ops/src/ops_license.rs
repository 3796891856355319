//! Operation: generate the license-header files the formatter reads.

use std::path::{Path, PathBuf};

use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;
use konvent_core::template::{LicenseTemplate, TemplateRegistry, KOTLIN_LICENSE_TEMPLATE};
use konvent_resolver::formatting::license_tasks;
use konvent_resolver::registry::TaskSpec;
use konvent_util::errors::KonventError;

/// What a license generation run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LicenseReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

/// Template registry for `manifest`, with the custom Kotlin template if one
/// is configured.
pub fn template_registry(manifest: &ProjectManifest) -> miette::Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::new();
    if let Some(path) = &manifest.options().license_template {
        registry.set(KOTLIN_LICENSE_TEMPLATE, LicenseTemplate::from_path(path)?);
    }
    Ok(registry)
}

fn task_input<'a>(task: &'a TaskSpec, key: &str) -> miette::Result<&'a str> {
    task.inputs.get(key).map(String::as_str).ok_or_else(|| {
        KonventError::Manifest {
            message: format!("task '{}' has no '{key}' input", task.path),
        }
        .into()
    })
}

/// Render both license headers into `<project_dir>/build/spotless-config`.
///
/// Files whose content is already current are left untouched.
pub fn generate(
    project_dir: &Path,
    manifest: &ProjectManifest,
    env: &BuildEnvironment,
) -> miette::Result<LicenseReport> {
    let repository_name = manifest.options().require_repository_name()?;
    let templates = template_registry(manifest)?;
    let year = env.year();

    let mut report = LicenseReport::default();
    for task in license_tasks(repository_name) {
        let template = templates.get(task_input(&task, "template")?)?;
        let output = project_dir.join(task_input(&task, "output")?);
        let content = template.render(repository_name, year);
        if konvent_util::fs::write_if_changed(&output, &content).map_err(KonventError::Io)? {
            tracing::info!("generated {}", output.display());
            report.written.push(output);
        } else {
            report.unchanged.push(output);
        }
    }
    Ok(report)
}

/// Generate license headers for the project at `project_dir`.
pub fn license(project_dir: &Path, env: &BuildEnvironment) -> miette::Result<LicenseReport> {
    let manifest = crate::load_manifest(project_dir)?;
    let report = generate(project_dir, &manifest, env)?;
    for path in &report.written {
        konvent_util::progress::status("Generated", &path.display().to_string());
    }
    for path in &report.unchanged {
        konvent_util::progress::status_info("Fresh", &path.display().to_string());
    }
    Ok(report)
}
