use std::path::Path;

use console::Style;
use miette::Result;

use konvent_core::environment::BuildEnvironment;
use konvent_core::properties::{load_env_file, ENV_FILE};

pub fn exec(root: &Path, reveal: bool) -> Result<()> {
    let env = BuildEnvironment::detect(root)?;
    let dim = Style::new().dim();

    println!("snapshot: {}", env.snapshot);
    let token = match (&env.sonar_token, reveal) {
        (Some(token), true) => token.clone(),
        (Some(_), false) => "********".to_string(),
        (None, _) => dim.apply_to("not set").to_string(),
    };
    println!("sonar token: {token}");

    let env_file = root.join(ENV_FILE);
    let vars = load_env_file(&env_file)?;
    if vars.is_empty() {
        println!("No environment variables configured.");
        println!("  {ENV_FILE}: {}", env_file.display());
        return Ok(());
    }

    println!("{ENV_FILE} ({} entries):", vars.len());
    for (key, value) in &vars {
        let display_value = if reveal { value.as_str() } else { "********" };
        println!("  {key} = {display_value}");
    }
    Ok(())
}
