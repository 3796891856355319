//! Handler for `konvent artifacts`.

use std::path::Path;

use miette::Result;

use konvent_ops::ops_artifacts;

pub fn exec(root: &Path, pom: Option<&str>, snapshot: bool) -> Result<()> {
    let env = super::build_environment(root, snapshot)?;
    let plans = ops_artifacts::artifacts(root, &env)?;

    if let Some(module) = pom {
        print!("{}", ops_artifacts::pom_preview(&plans, module)?);
        return Ok(());
    }

    if plans.is_empty() {
        println!("No publishable modules.");
        return Ok(());
    }
    for line in ops_artifacts::artifact_lines(&plans) {
        println!("{line}");
    }
    Ok(())
}
