use serde::Serialize;

use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;
use konvent_resolver::resolver::ResolvedConfiguration;
use konvent_util::errors::KonventError;

use crate::coordinates::{build_coordinates, Coordinates};
use crate::platform::ArtifactPlatform;
use crate::pom::{render_pom, PomMetadata};

/// Everything the publishing backend needs for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublicationPlan {
    pub module: String,
    pub coordinates: Coordinates,
    pub platform: ArtifactPlatform,
    pub pom: PomMetadata,
    /// Release the staging repository without manual promotion.
    pub automatic_release: bool,
}

impl PublicationPlan {
    pub fn render_pom(&self) -> miette::Result<String> {
        render_pom(&self.coordinates, self.platform.packaging(), &self.pom)
    }
}

/// Plan the publication for one resolved module; `None` when it has no
/// publish descriptor.
pub fn plan_publication(
    resolved: &ResolvedConfiguration,
    manifest: &ProjectManifest,
    env: &BuildEnvironment,
) -> miette::Result<Option<PublicationPlan>> {
    let Some(descriptor) = resolved.publish_descriptor else {
        return Ok(None);
    };
    let module = manifest
        .module(&resolved.module)
        .ok_or_else(|| KonventError::Manifest {
            message: format!("module '{}' is not declared in the manifest", resolved.module),
        })?;
    let coordinates = build_coordinates(module, resolved, manifest, env)?;
    let pom = PomMetadata::new(&resolved.artifact_id, manifest.options())?;
    Ok(Some(PublicationPlan {
        module: resolved.module.clone(),
        coordinates,
        platform: ArtifactPlatform::for_descriptor(descriptor),
        pom,
        automatic_release: true,
    }))
}

/// Plan every publication, in module declaration order.
pub fn plan_publications(
    resolved: &[ResolvedConfiguration],
    manifest: &ProjectManifest,
    env: &BuildEnvironment,
) -> miette::Result<Vec<PublicationPlan>> {
    let mut plans = Vec::new();
    for configuration in resolved {
        if let Some(plan) = plan_publication(configuration, manifest, env)? {
            plans.push(plan);
        }
    }
    Ok(plans)
}
