//! Operation: list publications and preview POMs.

use std::path::Path;

use konvent_core::environment::BuildEnvironment;
use konvent_publish::publication::{plan_publications, PublicationPlan};
use konvent_resolver::resolver::resolve_all;
use konvent_util::errors::KonventError;

/// Every publication of the project, in module declaration order.
pub fn artifacts(project_dir: &Path, env: &BuildEnvironment) -> miette::Result<Vec<PublicationPlan>> {
    let manifest = crate::load_manifest(project_dir)?;
    let resolved = resolve_all(&manifest)?;
    plan_publications(&resolved, &manifest, env)
}

/// `group:artifact:version` lines for every publication.
pub fn artifact_lines(plans: &[PublicationPlan]) -> Vec<String> {
    plans.iter().map(|p| p.coordinates.to_string()).collect()
}

/// Rendered POM for the publication of `module`.
pub fn pom_preview(plans: &[PublicationPlan], module: &str) -> miette::Result<String> {
    let plan = plans
        .iter()
        .find(|p| p.module == module || p.coordinates.artifact_id == module)
        .ok_or_else(|| KonventError::Manifest {
            message: format!("module '{module}' has no publication"),
        })?;
    plan.render_pom()
}
