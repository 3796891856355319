//! Operation: display the aggregated coverage task graph.

use std::path::Path;

use konvent_resolver::graph::build_graph;

/// Options for `konvent graph`.
#[derive(Debug, Default)]
pub struct GraphOptions {
    /// Print the flat execution order instead of a tree.
    pub order: bool,
}

/// Render the coverage task graph for the project.
pub fn graph(project_dir: &Path, opts: &GraphOptions) -> miette::Result<String> {
    let manifest = crate::load_manifest(project_dir)?;
    let graph = build_graph(&manifest)?;

    if graph.is_empty() {
        return Ok("No modules are included in coverage.\n".to_string());
    }

    if opts.order {
        let mut out = String::new();
        for (i, task) in graph.execution_order().into_iter().enumerate() {
            out.push_str(&format!("{:>3}. {task}\n", i + 1));
        }
        Ok(out)
    } else {
        Ok(graph.print_tree())
    }
}
