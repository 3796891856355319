//! The aggregated coverage task graph.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use konvent_core::manifest::ProjectManifest;
use konvent_util::errors::KonventError;

use crate::classify::capabilities;
use crate::coverage::{
    coverage_enabled, runner_task, COVERAGE_REPORT_TASKS, COVERAGE_TASK, COVERAGE_TASK_GROUP,
};
use crate::registry::{TaskRegistry, TaskSpec};

/// Coverage tasks across the project, with their prerequisites.
///
/// Edges point from a prerequisite to the task that needs it, so a
/// topological sort yields an execution order. Prerequisites that are not
/// registered here (module test runners) are leaf nodes.
#[derive(Debug, Default)]
pub struct AggregatedTaskGraph {
    registry: TaskRegistry,
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    order: Vec<NodeIndex>,
}

impl AggregatedTaskGraph {
    /// Build the graph over every task in `registry`.
    pub fn from_registry(registry: TaskRegistry) -> miette::Result<Self> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        let mut node = |graph: &mut DiGraph<String, ()>, path: &str| {
            *index
                .entry(path.to_string())
                .or_insert_with(|| graph.add_node(path.to_string()))
        };

        for task in registry.iter() {
            let to = node(&mut graph, &task.path);
            for dep in &task.depends_on {
                let from = node(&mut graph, dep);
                graph.add_edge(from, to, ());
            }
        }

        let order = toposort(&graph, None).map_err(|cycle| KonventError::Manifest {
            message: format!(
                "task graph contains a cycle through '{}'",
                graph[cycle.node_id()]
            ),
        })?;

        Ok(Self {
            registry,
            graph,
            index,
            order,
        })
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn task(&self, path: &str) -> Option<&TaskSpec> {
        self.registry.get(path)
    }

    /// The root `:testCoverage` task, if any module is included in coverage.
    pub fn root_task(&self) -> Option<&TaskSpec> {
        self.registry.get(&TaskSpec::root_path(COVERAGE_TASK))
    }

    /// Modules whose coverage task the root task depends on.
    pub fn root_dependencies(&self) -> BTreeSet<String> {
        self.root_task()
            .map(|root| {
                root.depends_on
                    .iter()
                    .filter_map(|path| {
                        let rest = path.strip_prefix(':')?;
                        let (module, _) = rest.rsplit_once(':')?;
                        Some(module.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every task path, prerequisites first.
    pub fn execution_order(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|&idx| self.graph[idx].as_str())
            .collect()
    }

    /// Direct prerequisites of `path`.
    pub fn prerequisites_of(&self, path: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(path) else {
            return Vec::new();
        };
        let mut deps: Vec<&str> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| self.graph[e.source()].as_str())
            .collect();
        deps.sort_unstable();
        deps
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Render the graph as a tree rooted at the tasks nothing depends on.
    pub fn print_tree(&self) -> String {
        let mut output = String::new();
        let mut tops: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .collect();
        tops.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));

        for top in tops {
            output.push_str(&self.graph[top]);
            if let Some(task) = self.registry.get(&self.graph[top]) {
                if !task.finalized_by.is_empty() {
                    output.push_str(&format!(" (finalized by {})", task.finalized_by.join(", ")));
                }
            }
            output.push('\n');
            let mut visited = HashSet::new();
            visited.insert(top);
            let children = self.sorted_prerequisites(top);
            let count = children.len();
            for (i, child) in children.into_iter().enumerate() {
                self.print_subtree(&mut output, child, "", i == count - 1, &mut visited);
            }
        }
        output
    }

    fn sorted_prerequisites(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut deps: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        deps.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        deps
    }

    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.graph[idx]));

        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.sorted_prerequisites(idx);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(output, child, &child_prefix, i == count - 1, visited);
        }

        visited.remove(&idx);
    }
}

/// Register the per-module and aggregated coverage tasks for `manifest`.
///
/// Each included module gets `:<m>:testCoverage` depending on its test
/// runner. If at least one module is included, the root `:testCoverage`
/// depends on all of them and is finalized by the Kover report tasks.
pub fn build_graph(manifest: &ProjectManifest) -> miette::Result<AggregatedTaskGraph> {
    let options = manifest.options();
    for name in &options.coverage.included_modules {
        if !manifest.contains(name) {
            tracing::warn!("coverage.included-modules lists '{name}' but no such module exists");
        }
    }

    let mut registry = TaskRegistry::new();
    let mut module_tasks = Vec::new();
    for module in manifest.modules() {
        if !coverage_enabled(module, options)? {
            continue;
        }
        let runner = TaskSpec::module_path(&module.name, runner_task(&capabilities(module)?));
        let task = TaskSpec::new(TaskSpec::module_path(&module.name, COVERAGE_TASK))
            .group(COVERAGE_TASK_GROUP)
            .description("Run module-specific tests")
            .depends_on(runner);
        module_tasks.push(registry.register(task)?.path.clone());
    }

    if module_tasks.is_empty() {
        tracing::debug!("no modules included in coverage; skipping aggregated task");
    } else {
        let mut root = TaskSpec::new(TaskSpec::root_path(COVERAGE_TASK))
            .group(COVERAGE_TASK_GROUP)
            .description("Run all tests in all modules and generate merged coverage report");
        for path in module_tasks {
            root = root.depends_on(path);
        }
        for report in COVERAGE_REPORT_TASKS {
            root = root.finalized_by(TaskSpec::root_path(report));
        }
        registry.register(root)?;
    }

    AggregatedTaskGraph::from_registry(registry)
}
