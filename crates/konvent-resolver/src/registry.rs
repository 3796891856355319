//! Task registration.
//!
//! Several modules may ask for the same root task (the license generators are
//! requested once per formatted module). Registering an identical task again
//! is a no-op; registering the same path with different parameters fails.

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use konvent_util::errors::KonventError;

/// A task to be created in the host build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskSpec {
    /// Fully qualified path, e.g. `:core:testCoverage` or `:testCoverage`.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub depends_on: BTreeSet<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub finalized_by: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, String>,
}

impl TaskSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: None,
            description: None,
            depends_on: BTreeSet::new(),
            finalized_by: Vec::new(),
            inputs: BTreeMap::new(),
        }
    }

    /// Path of the task `name` in module `module`.
    pub fn module_path(module: &str, name: &str) -> String {
        format!(":{module}:{name}")
    }

    /// Path of the root-project task `name`.
    pub fn root_path(name: &str) -> String {
        format!(":{name}")
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn depends_on(mut self, task: impl Into<String>) -> Self {
        self.depends_on.insert(task.into());
        self
    }

    pub fn finalized_by(mut self, task: impl Into<String>) -> Self {
        self.finalized_by.push(task.into());
        self
    }

    pub fn input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// The task name without its project prefix.
    pub fn name(&self) -> &str {
        self.path.rsplit(':').next().unwrap_or(&self.path)
    }

    /// The owning module, or `None` for root tasks.
    pub fn module(&self) -> Option<&str> {
        let rest = self.path.strip_prefix(':')?;
        let (module, _) = rest.rsplit_once(':')?;
        Some(module)
    }
}

impl fmt::Display for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(group) = &self.group {
            write!(f, " group={group}")?;
        }
        if !self.depends_on.is_empty() {
            let deps: Vec<&str> = self.depends_on.iter().map(String::as_str).collect();
            write!(f, " dependsOn=[{}]", deps.join(", "))?;
        }
        if !self.finalized_by.is_empty() {
            write!(f, " finalizedBy=[{}]", self.finalized_by.join(", "))?;
        }
        for (key, value) in &self.inputs {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// All tasks registered during one resolution pass, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, TaskSpec>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, or return the existing one if it is identical.
    pub fn register(&mut self, spec: TaskSpec) -> miette::Result<&TaskSpec> {
        match self.tasks.entry(spec.path.clone()) {
            Entry::Occupied(entry) => {
                if *entry.get() != spec {
                    return Err(KonventError::TaskRedefinition {
                        task: spec.path.clone(),
                        existing: entry.get().to_string(),
                        requested: spec.to_string(),
                    }
                    .into());
                }
                tracing::debug!(task = %spec.path, "task already registered");
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                tracing::debug!(task = %spec.path, "registering task");
                Ok(&*entry.insert(spec))
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&TaskSpec> {
        self.tasks.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tasks.contains_key(path)
    }

    /// Registered tasks ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
