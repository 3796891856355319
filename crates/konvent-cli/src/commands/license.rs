use std::path::Path;

use miette::Result;

pub fn exec(root: &Path) -> Result<()> {
    let env = super::build_environment(root, false)?;
    konvent_ops::ops_license::license(root, &env)?;
    Ok(())
}
