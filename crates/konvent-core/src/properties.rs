use std::collections::BTreeMap;
use std::path::Path;

use konvent_util::errors::KonventError;

/// File holding local build secrets (`SONAR_TOKEN`, `SNAPSHOT`, ...).
pub const ENV_FILE: &str = ".konvent.env";

/// Load a `.konvent.env` file in shell `KEY=value` format.
///
/// Blank lines and `#` comments are skipped, an optional `export ` prefix is
/// accepted, and values wrapped in matching single or double quotes are
/// unquoted. A missing file yields an empty map.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path).map_err(KonventError::Io)?;
    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value)) = trimmed.split_once('=') else {
            tracing::warn!(
                "{}:{}: ignoring line without '='",
                path.display(),
                lineno + 1
            );
            continue;
        };
        map.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }
    Ok(map)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Look up `key` in `overrides` first, then in the process environment.
pub fn lookup(key: &str, overrides: &BTreeMap<String, String>) -> Option<String> {
    overrides
        .get(key)
        .cloned()
        .or_else(|| std::env::var(key).ok())
}

/// Interpolate `${env:VAR}` and `${env:VAR:-default}` references.
///
/// Unresolved references without a default become empty strings.
pub fn interpolate(input: &str, overrides: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${env:") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let reference = &rest[start + 6..start + len];
        let (key, default) = match reference.split_once(":-") {
            Some((key, default)) => (key, Some(default)),
            None => (reference, None),
        };
        let value = lookup(key, overrides)
            .or_else(|| default.map(str::to_string))
            .unwrap_or_default();
        result.push_str(&value);
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}
