//! Convention resolution for Konvent projects.
//!
//! Given a [`konvent_core::manifest::ProjectManifest`], this crate classifies
//! every module, derives the conventions that apply to it, and aggregates the
//! coverage tasks that span modules.

pub mod classify;
pub mod compile;
pub mod coverage;
pub mod formatting;
pub mod graph;
pub mod registry;
pub mod resolver;
pub mod sonar;
