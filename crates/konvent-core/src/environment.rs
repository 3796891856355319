use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::properties::{load_env_file, lookup, ENV_FILE};

/// Environment flag that turns versions into timestamped snapshots.
pub const SNAPSHOT_ENV: &str = "SNAPSHOT";

/// Environment variable holding the SonarCloud token.
pub const SONAR_TOKEN_ENV: &str = "SONAR_TOKEN";

/// The parts of the invoking environment that influence resolution.
///
/// Captured once per invocation so the whole pass sees one instant and one
/// set of flags. `Debug` masks the Sonar token.
#[derive(Clone, PartialEq, Eq)]
pub struct BuildEnvironment {
    pub snapshot: bool,
    pub sonar_token: Option<String>,
    pub now: DateTime<Utc>,
}

impl fmt::Debug for BuildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildEnvironment")
            .field("snapshot", &self.snapshot)
            .field("sonar_token", &self.sonar_token.as_ref().map(|_| "***"))
            .field("now", &self.now)
            .finish()
    }
}

impl BuildEnvironment {
    /// A release environment at the given instant: no snapshot, no token.
    pub fn release(now: DateTime<Utc>) -> Self {
        Self {
            snapshot: false,
            sonar_token: None,
            now,
        }
    }

    /// Build from explicit variables, falling back to the process environment.
    pub fn from_vars(vars: &BTreeMap<String, String>, now: DateTime<Utc>) -> Self {
        let snapshot = lookup(SNAPSHOT_ENV, vars)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let sonar_token = lookup(SONAR_TOKEN_ENV, vars).filter(|t| !t.trim().is_empty());
        Self {
            snapshot,
            sonar_token,
            now,
        }
    }

    /// Read `.konvent.env` next to the manifest and the process environment.
    pub fn detect(project_dir: &Path) -> miette::Result<Self> {
        let vars = load_env_file(&project_dir.join(ENV_FILE))?;
        let env = Self::from_vars(&vars, Utc::now());
        tracing::debug!(
            snapshot = env.snapshot,
            sonar = env.sonar_token.is_some(),
            "detected build environment"
        );
        Ok(env)
    }

    /// The current UTC year, used for license headers.
    pub fn year(&self) -> i32 {
        self.now.year()
    }

    /// Override the snapshot flag (e.g. from a CLI switch).
    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.snapshot = snapshot;
        self
    }
}
