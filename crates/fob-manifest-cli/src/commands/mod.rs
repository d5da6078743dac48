//! Command implementations.
//!
//! - [`inject`] - run the loader on one file and write the result
//! - [`graph`] - print a file's manifest
//!
//! Each command is built from its parsed arguments plus the global config
//! flags and exposes an async `run`.

pub mod graph;
pub mod inject;

pub use graph::GraphCommand;
pub use inject::InjectCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve a command-line path against the working directory.
pub(crate) fn entry_path(file: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(crate::config::absolutize(file, &cwd))
}
