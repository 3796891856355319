//! Handler for `konvent graph`.

use std::path::Path;

use miette::Result;

use konvent_ops::ops_graph::{self, GraphOptions};

pub fn exec(root: &Path, order: bool) -> Result<()> {
    let output = ops_graph::graph(root, &GraphOptions { order })?;
    print!("{output}");
    Ok(())
}
