//! Core data types for the Konvent convention resolver.
//!
//! This crate defines the types that describe a multi-module project before
//! any convention is applied: manifest parsing, module descriptors and their
//! capabilities, the global options model, the two-phase workspace builder,
//! the build environment, and license-header templates.
//!
//! Nothing here decides conventions; that is `konvent-resolver`'s job.

/// Java source/target compatibility applied to every module.
pub const JAVA_VERSION: &str = "11";

/// Kotlin `jvmTarget` applied to every module that compiles Kotlin.
pub const JVM_TARGET: &str = "11";

/// Maven group used when the manifest does not declare one.
pub const DEFAULT_GROUP_ID: &str = "io.getstream";

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Konvent.toml";

pub mod capability;
pub mod environment;
pub mod manifest;
pub mod module;
pub mod options;
pub mod properties;
pub mod template;
pub mod workspace;
