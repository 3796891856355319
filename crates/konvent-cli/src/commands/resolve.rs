//! Handler for `konvent resolve`.

use std::path::Path;

use miette::Result;

use konvent_ops::ops_resolve::{self, OutputFormat};

use crate::cli::Format;

pub fn exec(root: &Path, format: Format, snapshot: bool) -> Result<()> {
    let env = super::build_environment(root, snapshot)?;
    let format = match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
    };
    ops_resolve::resolve(root, &env, format)?;
    Ok(())
}
