//! Command dispatch and handler modules.

mod artifacts;
mod check;
mod env;
mod graph;
mod license;
mod resolve;

use std::path::{Path, PathBuf};

use miette::Result;

use konvent_core::environment::BuildEnvironment;
use konvent_util::errors::KonventError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let root = project_root(cli.project_dir.as_deref())?;
    tracing::debug!("project root: {}", root.display());
    match cli.command {
        Command::Resolve { format, snapshot } => resolve::exec(&root, format, snapshot),
        Command::Check { snapshot } => check::exec(&root, snapshot),
        Command::Graph { order } => graph::exec(&root, order),
        Command::Artifacts { pom, snapshot } => artifacts::exec(&root, pom.as_deref(), snapshot),
        Command::License => license::exec(&root),
        Command::Env { reveal } => env::exec(&root, reveal),
    }
}

/// The project root: the nearest directory at or above `start` (or the
/// current directory) holding a `Konvent.toml`.
fn project_root(start: Option<&Path>) -> Result<PathBuf> {
    let start = match start {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(KonventError::Io)?,
    };
    konvent_ops::find_project_root(&start)
}

/// Detect the build environment, with `--snapshot` forcing snapshot versions.
fn build_environment(root: &Path, snapshot: bool) -> Result<BuildEnvironment> {
    let env = BuildEnvironment::detect(root)?;
    Ok(if snapshot { env.with_snapshot(true) } else { env })
}
