//! Operation: resolve every convention and print the plan.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use konvent_core::environment::BuildEnvironment;
use konvent_core::manifest::ProjectManifest;
use konvent_publish::publication::{plan_publications, PublicationPlan};
use konvent_resolver::formatting::register_support_tasks;
use konvent_resolver::graph::build_graph;
use konvent_resolver::registry::{TaskRegistry, TaskSpec};
use konvent_resolver::resolver::{resolve_all, ResolvedConfiguration};
use konvent_resolver::sonar::SonarPlan;
use konvent_util::errors::KonventError;
use konvent_util::hash::Fingerprint;

/// How `konvent resolve` prints the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub group: String,
    pub repository_name: Option<String>,
}

/// Coverage tasks and the order the host should run them in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoverageTasks {
    pub tasks: Vec<TaskSpec>,
    pub execution_order: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanBody {
    pub project: ProjectInfo,
    pub modules: Vec<ResolvedConfiguration>,
    pub coverage: CoverageTasks,
    pub support_tasks: TaskRegistry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sonar: Option<SonarPlan>,
    pub publications: Vec<PublicationPlan>,
}

/// The full resolution output for a project.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionPlan {
    #[serde(flatten)]
    pub body: PlanBody,
    /// SHA-256 over the JSON form of `body`; unchanged inputs give an
    /// unchanged fingerprint.
    pub fingerprint: String,
}

fn json_error(e: serde_json::Error) -> KonventError {
    KonventError::Manifest {
        message: format!("Failed to serialize resolution plan: {e}"),
    }
}

/// Run every resolution step for `manifest`.
pub fn build_plan(
    project_dir: &Path,
    manifest: &ProjectManifest,
    env: &BuildEnvironment,
) -> miette::Result<ResolutionPlan> {
    let modules = resolve_all(manifest)?;

    let graph = build_graph(manifest)?;
    let coverage = CoverageTasks {
        tasks: graph.registry().iter().cloned().collect(),
        execution_order: graph
            .execution_order()
            .into_iter()
            .map(String::from)
            .collect(),
    };

    let mut support_tasks = TaskRegistry::new();
    register_support_tasks(
        &mut support_tasks,
        modules.iter().filter_map(|m| m.formatting.as_ref()),
    )?;

    let sonar = SonarPlan::for_project(manifest, project_dir, env)?;
    let publications = plan_publications(&modules, manifest, env)?;

    let body = PlanBody {
        project: ProjectInfo {
            name: manifest.name().to_string(),
            version: manifest.version().to_string(),
            group: manifest.group().to_string(),
            repository_name: manifest.options().repository_name.clone(),
        },
        modules,
        coverage,
        support_tasks,
        sonar,
        publications,
    };

    let json = serde_json::to_vec(&body).map_err(json_error)?;
    let mut fingerprint = Fingerprint::new();
    fingerprint.update("plan", &json);
    Ok(ResolutionPlan {
        body,
        fingerprint: fingerprint.finish(),
    })
}

/// Human-readable summary of a plan.
pub fn render_text(plan: &ResolutionPlan) -> String {
    let body = &plan.body;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} v{} ({})",
        body.project.name, body.project.version, body.project.group
    );
    out.push('\n');

    for module in &body.modules {
        let _ = writeln!(out, "{} [{}]", module.module, module.module_type);
        let _ = writeln!(out, "  steps: {}", module.steps().join(" -> "));
        if let Some(formatting) = &module.formatting {
            let _ = writeln!(
                out,
                "  formatter: {:?}, {} exclusion pattern(s)",
                formatting.formatter,
                formatting.exclude_patterns.len()
            );
        }
        if let Some(coverage) = &module.coverage {
            let _ = writeln!(
                out,
                "  coverage: variant '{}' via {}",
                coverage.variant, coverage.runner_task
            );
        }
        if let Some(publication) = body.publications.iter().find(|p| p.module == module.module) {
            let _ = writeln!(out, "  publishes: {}", publication.coordinates);
        }
    }

    if !body.coverage.tasks.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "coverage tasks:");
        for task in &body.coverage.execution_order {
            let _ = writeln!(out, "  {task}");
        }
    }

    if !body.support_tasks.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "support tasks:");
        for task in body.support_tasks.iter() {
            let _ = writeln!(out, "  {}", task.path);
        }
    }

    if let Some(sonar) = &body.sonar {
        out.push('\n');
        let _ = writeln!(out, "sonar:");
        for (key, value) in sonar.properties() {
            let _ = writeln!(out, "  {key} = {value}");
        }
    }

    out.push('\n');
    let _ = writeln!(out, "fingerprint: {}", plan.fingerprint);
    out
}

/// Resolve the project at `project_dir` and print the plan to stdout.
pub fn resolve(
    project_dir: &Path,
    env: &BuildEnvironment,
    format: OutputFormat,
) -> miette::Result<ResolutionPlan> {
    let manifest = crate::load_manifest(project_dir)?;
    konvent_util::progress::status(
        "Resolving",
        &format!("{} v{}", manifest.name(), manifest.version()),
    );
    let plan = build_plan(project_dir, &manifest, env)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&plan)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&plan).map_err(json_error)?
        ),
    }
    konvent_util::progress::status(
        "Finished",
        &format!("{} module(s) resolved", plan.body.modules.len()),
    );
    Ok(plan)
}
