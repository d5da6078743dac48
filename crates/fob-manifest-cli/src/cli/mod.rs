//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `fob-manifest inject <FILE>` - splice the manifest into FILE at its marker
//! - `fob-manifest graph <FILE>` - print the manifest JSON for FILE

mod commands;
pub mod enums;
mod tests;

use std::path::PathBuf;

use clap::{Args, Parser};

pub use commands::{Command, GraphArgs, InjectArgs};
pub use enums::*;

/// fob-manifest - embed a file's import tree into its own source
#[derive(Parser, Debug)]
#[command(
    name = "fob-manifest",
    version,
    about = "Embed a file's static import tree into its own source",
    long_about = "Builds the static import tree reachable from a TypeScript/JSX file and\n\
                  splices it as JSON at the `/* inject */ {}` marker, optionally with a\n\
                  source map. Files outside the source root are recorded but not expanded."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Flags layered over `fob-manifest.toml` and `FOB_MANIFEST_*` variables.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (defaults to `<base>/fob-manifest.toml`)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base directory for the root request and path aliases
    #[arg(long, global = true, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Directory name marking the tracked source root
    #[arg(long, global = true, value_name = "NAME")]
    pub source_dir: Option<String>,

    /// Manifest shape
    #[arg(long, global = true, value_enum)]
    pub format: Option<ManifestFormatArg>,

    /// Record the line count of every node
    #[arg(long, global = true)]
    pub line_counts: bool,

    /// Policy for dependencies outside the source root
    #[arg(long, global = true, value_enum)]
    pub outside_root: Option<OutsideRootArg>,
}
