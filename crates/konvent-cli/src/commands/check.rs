//! Check command implementation.

use std::path::Path;

use miette::Result;

pub fn exec(root: &Path, snapshot: bool) -> Result<()> {
    let env = super::build_environment(root, snapshot)?;
    konvent_ops::ops_check::check(root, &env)?;
    Ok(())
}
