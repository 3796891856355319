//! Operation: validate the manifest and every derived convention without
//! printing the plan.

use std::path::Path;

use konvent_core::environment::BuildEnvironment;

use crate::ops_resolve::build_plan;

/// Counts reported by a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub modules: usize,
    pub coverage_modules: usize,
    pub publications: usize,
}

/// Run a full resolution pass and report what it would produce.
pub fn check(project_dir: &Path, env: &BuildEnvironment) -> miette::Result<CheckSummary> {
    let manifest = crate::load_manifest(project_dir)?;
    konvent_util::progress::status(
        "Checking",
        &format!("{} v{}", manifest.name(), manifest.version()),
    );

    let plan = build_plan(project_dir, &manifest, env)?;
    let summary = CheckSummary {
        modules: plan.body.modules.len(),
        coverage_modules: plan
            .body
            .modules
            .iter()
            .filter(|m| m.analysis_enabled)
            .count(),
        publications: plan.body.publications.len(),
    };

    if summary.coverage_modules == 0 {
        konvent_util::progress::status_warn("Warning", "no modules are included in coverage");
    }
    konvent_util::progress::status(
        "Finished",
        &format!(
            "{} module(s), {} covered, {} publication(s)",
            summary.modules, summary.coverage_modules, summary.publications
        ),
    );
    Ok(summary)
}
