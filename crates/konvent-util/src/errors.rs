use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Konvent operations.
///
/// Every variant is a resolution-time failure: a pass that hits one of these
/// aborts for the whole manifest and nothing is applied.
#[derive(Debug, Error, Diagnostic)]
pub enum KonventError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Konvent.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Konvent.toml for syntax errors"))]
    Manifest { message: String },

    /// Two modules were declared with the same name.
    #[error("Module '{module}' is declared more than once")]
    #[diagnostic(help("Module names must be unique within a manifest"))]
    DuplicateModule { module: String },

    /// A module's type tag is not one of the recognized module types.
    #[error("Module '{module}' has unknown type '{tag}'")]
    #[diagnostic(help(
        "Use one of: android-application, android-library, android-test, java-library, java-platform"
    ))]
    UnknownModuleType { module: String, tag: String },

    /// The per-module coverage flag and the global coverage set disagree.
    #[error(
        "Module '{module}' has inconsistent coverage configuration: \
         module flag is {flag}, listed in coverage.included-modules is {listed}"
    )]
    #[diagnostic(help(
        "Either list the module in coverage.included-modules and set its coverage flag, or do neither"
    ))]
    InconsistentCoverageConfig {
        module: String,
        flag: bool,
        listed: bool,
    },

    /// Publishing was requested for a module type that is never published.
    #[error("Module '{module}' of type {module_type} cannot be published")]
    #[diagnostic(help("Only libraries and platforms are published; disable publishing for this module"))]
    UnpublishableModule { module: String, module_type: String },

    /// A task was registered twice with different parameters.
    #[error("Task '{task}' is already registered with different parameters")]
    #[diagnostic(help("existing: {existing}\nrequested: {requested}"))]
    TaskRedefinition {
        task: String,
        existing: String,
        requested: String,
    },

    /// A derived value needs an option that was never configured.
    #[error("Required option '{option}' is not configured")]
    #[diagnostic(help("Set '{option}' in Konvent.toml"))]
    MissingRequiredOption { option: String },

    /// A license-header template could not be found.
    #[error("Could not find license template '{name}'")]
    MissingTemplateResource { name: String },

    /// A glob pattern in the options is not valid glob syntax.
    #[error("Invalid pattern '{pattern}' in {option}: {message}")]
    InvalidPattern {
        option: String,
        pattern: String,
        message: String,
    },
}

/// Convenience alias for `miette::Result<T>`.
pub type KonventResult<T> = miette::Result<T>;
