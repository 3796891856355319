//! Maven coordinates and snapshot versions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;
use konvent_core::module::ModuleDescriptor;
use konvent_resolver::resolver::ResolvedConfiguration;
use konvent_util::errors::KonventError;

/// UTC timestamp embedded in snapshot versions, minute precision.
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Coordinates {
    pub group: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinates {
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("-SNAPSHOT")
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact_id, self.version)
    }
}

/// `<base>-<yyyyMMddHHmm>-SNAPSHOT` at `now`.
pub fn snapshot_version(base: &str, now: DateTime<Utc>) -> String {
    format!("{base}-{}-SNAPSHOT", now.format(SNAPSHOT_TIMESTAMP_FORMAT))
}

/// The version to publish under: the base version, or a timestamped snapshot
/// when the environment asks for one.
pub fn effective_version(base: &str, env: &BuildEnvironment) -> String {
    if env.snapshot {
        snapshot_version(base, env.now)
    } else {
        base.to_string()
    }
}

/// Compute the coordinates `module` would publish under.
///
/// Fails for module types that never publish, whatever their flags say.
pub fn build_coordinates(
    module: &ModuleDescriptor,
    resolved: &ResolvedConfiguration,
    manifest: &ProjectManifest,
    env: &BuildEnvironment,
) -> miette::Result<Coordinates> {
    if !resolved.module_type.is_publishable() {
        return Err(KonventError::UnpublishableModule {
            module: module.name.clone(),
            module_type: resolved.module_type.to_string(),
        }
        .into());
    }
    let coordinates = Coordinates {
        group: manifest.group().to_string(),
        artifact_id: resolved.artifact_id.clone(),
        version: effective_version(manifest.version(), env),
    };
    tracing::debug!(module = %module.name, %coordinates, "built coordinates");
    Ok(coordinates)
}
