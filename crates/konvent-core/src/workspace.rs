use std::collections::BTreeSet;

use konvent_util::errors::KonventError;

use crate::manifest::ProjectManifest;
use crate::module::ModuleDescriptor;
use crate::options::GlobalOptions;
use crate::DEFAULT_GROUP_ID;

/// Declaration phase of a project.
///
/// Modules and options are declared in any order; [`WorkspaceBuilder::finish`]
/// checks the declarations as a whole and produces the read-only
/// [`ProjectManifest`] that resolution runs on.
#[derive(Debug, Clone)]
pub struct WorkspaceBuilder {
    name: String,
    version: String,
    group: String,
    modules: Vec<ModuleDescriptor>,
    options: GlobalOptions,
}

impl WorkspaceBuilder {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            options: GlobalOptions {
                repository_name: Some(name.clone()),
                ..GlobalOptions::default()
            },
            name,
            version: version.into(),
            group: DEFAULT_GROUP_ID.to_string(),
            modules: Vec::new(),
        }
    }

    pub fn group(&mut self, group: impl Into<String>) -> &mut Self {
        self.group = group.into();
        self
    }

    /// Replace the global options. Later calls win.
    pub fn options(&mut self, options: GlobalOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn declare_module(&mut self, module: ModuleDescriptor) -> &mut Self {
        self.modules.push(module);
        self
    }

    /// Close the declaration phase.
    ///
    /// Fails on duplicate module names or invalid options.
    pub fn finish(self) -> miette::Result<ProjectManifest> {
        if self.name.trim().is_empty() {
            return Err(KonventError::MissingRequiredOption {
                option: "project.name".to_string(),
            }
            .into());
        }
        if self.version.trim().is_empty() {
            return Err(KonventError::MissingRequiredOption {
                option: "project.version".to_string(),
            }
            .into());
        }

        let mut seen = BTreeSet::new();
        for module in &self.modules {
            if !seen.insert(module.name.as_str()) {
                return Err(KonventError::DuplicateModule {
                    module: module.name.clone(),
                }
                .into());
            }
        }
        self.options.validate()?;

        Ok(ProjectManifest {
            name: self.name,
            version: self.version,
            group: self.group,
            modules: self.modules,
            options: self.options,
        })
    }
}
