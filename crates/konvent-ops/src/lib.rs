pub mod ops_artifacts;
pub mod ops_check;
pub mod ops_graph;
pub mod ops_license;
pub mod ops_resolve;

use std::path::{Path, PathBuf};

use konvent_core::manifest::ProjectManifest;
use konvent_core::MANIFEST_FILE;
use konvent_util::errors::KonventError;

/// Find the directory holding `Konvent.toml`, walking up from `start`.
///
/// The result is canonical, so every spelling of the same directory yields
/// the same plan.
pub fn find_project_root(start: &Path) -> miette::Result<PathBuf> {
    let root = konvent_util::fs::find_ancestor_with(start, MANIFEST_FILE).ok_or_else(|| {
        KonventError::Manifest {
            message: format!(
                "could not find {MANIFEST_FILE} in {} or any parent directory",
                start.display()
            ),
        }
    })?;
    root.canonicalize()
        .map_err(|e| KonventError::Io(e).into())
}

/// Load the manifest at the project root.
pub fn load_manifest(project_dir: &Path) -> miette::Result<ProjectManifest> {
    ProjectManifest::from_path(&project_dir.join(MANIFEST_FILE))
}
