//! Error types for manifest generation.
//!
//! Only failures outside the graph-construction contract show up here. Parse,
//! resolution and read failures inside the graph are absorbed by the traversal
//! and turn into missing edges or leaf nodes instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::runtime::RuntimeError;

/// Failure to extract import specifiers from a file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The parser reported at least one diagnostic.
    #[error("failed to parse module: {message}")]
    Parse {
        /// First diagnostic emitted by the parser.
        message: String,
    },
}

/// Errors that abort a traversal.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// The base directory could not be determined.
    #[error("failed to determine base directory: {0}")]
    CurrentDir(#[source] RuntimeError),

    /// The configured upper bound on visited paths was reached.
    #[error("too many modules visited: {count} (max: {max} allowed)")]
    TooManyModules { count: usize, max: usize },
}

/// Errors produced while splicing a manifest into source text.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The injection marker was required but not present.
    #[error("injection marker `/* inject */ {{}}` not found")]
    MarkerNotFound,

    /// The manifest could not be serialized to JSON.
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors reported to the host from a transform.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to build manifest for '{}': {source}", .path.display())]
    Traverse {
        path: PathBuf,
        #[source]
        source: TraverseError,
    },

    #[error(transparent)]
    Inject(#[from] InjectError),
}

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid config value for `{field}`: {hint}")]
    InvalidValue { field: String, hint: String },
}
