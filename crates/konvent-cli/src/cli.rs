//! CLI argument definitions for Konvent.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "konvent",
    version,
    about = "Convention resolver for multi-module Kotlin/Android builds",
    long_about = "Konvent reads a Konvent.toml manifest and derives, for every module, the \
                  compiler, formatting, coverage and publishing conventions to apply, plus \
                  the aggregated coverage tasks that span modules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (defaults to the nearest ancestor with a Konvent.toml)
    #[arg(long, global = true, env = "KONVENT_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every module and print the plan
    Resolve {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Resolve as a snapshot build (same as SNAPSHOT=true)
        #[arg(long)]
        snapshot: bool,
    },

    /// Validate the manifest and all derived conventions
    Check {
        /// Resolve as a snapshot build
        #[arg(long)]
        snapshot: bool,
    },

    /// Show the aggregated coverage task graph
    Graph {
        /// Print the flat execution order instead of a tree
        #[arg(long)]
        order: bool,
    },

    /// List published artifacts as group:artifact:version
    Artifacts {
        /// Print the POM for this module instead of the list
        #[arg(long, value_name = "MODULE")]
        pom: Option<String>,
        /// Use snapshot versions
        #[arg(long)]
        snapshot: bool,
    },

    /// Generate the license-header files used by the formatter
    License,

    /// Show the build environment and .konvent.env entries
    Env {
        /// Show secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
