//! License-header templates.
//!
//! Templates are plain text compiled into the binary via `include_str!`. Two
//! placeholders are substituted at render time: `$PROJECT` becomes the
//! repository name and `$YEAR` the current year. The placeholders do not
//! overlap, so substitution order does not matter.

use std::collections::BTreeMap;
use std::path::Path;

use konvent_util::errors::KonventError;

/// Bundled header for Kotlin and Java sources.
pub const KOTLIN_LICENSE_TEMPLATE: &str = "license-header.txt";

/// Bundled header for XML resources.
pub const XML_LICENSE_TEMPLATE: &str = "license-header.xml";

pub const PROJECT_PLACEHOLDER: &str = "$PROJECT";
pub const YEAR_PLACEHOLDER: &str = "$YEAR";

/// Replace `$PROJECT` and `$YEAR` in `template`.
pub fn substitute(template: &str, project: &str, year: i32) -> String {
    template
        .replace(PROJECT_PLACEHOLDER, project)
        .replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// A named license-header template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTemplate {
    pub name: String,
    pub content: String,
}

impl LicenseTemplate {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Load a template from disk. A missing file is a `MissingTemplateResource`.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Err(KonventError::MissingTemplateResource {
                name: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path).map_err(KonventError::Io)?;
        Ok(Self::new(path.display().to_string(), content))
    }

    pub fn render(&self, project: &str, year: i32) -> String {
        substitute(&self.content, project, year)
    }
}

/// Registry of license templates, pre-populated with the bundled ones.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, LicenseTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let bundled = [
            (
                KOTLIN_LICENSE_TEMPLATE,
                include_str!("../templates/license-header.txt"),
            ),
            (
                XML_LICENSE_TEMPLATE,
                include_str!("../templates/license-header.xml"),
            ),
        ];
        let templates = bundled
            .into_iter()
            .map(|(name, content)| (name.to_string(), LicenseTemplate::new(name, content)))
            .collect();
        Self { templates }
    }

    /// Replace the template registered under `name`.
    pub fn set(&mut self, name: impl Into<String>, template: LicenseTemplate) {
        self.templates.insert(name.into(), template);
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> miette::Result<&LicenseTemplate> {
        self.templates.get(name).ok_or_else(|| {
            KonventError::MissingTemplateResource {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
