//! Filesystem access for manifest generation.
//!
//! Traversal and resolution only see the filesystem through [`Runtime`], so
//! the same graph code runs over real files ([`native::NativeRuntime`]) or an
//! in-memory tree in tests (`memory::MemoryRuntime`). The awaits on these
//! methods are the only places a traversal can suspend.

pub mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Any other I/O failure, already rendered with its path.
    #[error("I/O error: {0}")]
    Io(String),

    /// Failures of the runtime itself, such as a lost blocking task.
    #[error("runtime error: {0}")]
    Other(String),
}

/// What the resolver and traversal need to know about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Size in bytes. Zero for directories in memory.
    pub size: u64,
    pub is_dir: bool,
    pub is_file: bool,
}

/// Read-only filesystem probes.
///
/// Implementations must never mutate the filesystem.
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Fixed(Vec<u8>);
///
/// #[async_trait]
/// impl Runtime for Fixed {
///     async fn read_file(&self, _path: &Path) -> RuntimeResult<Vec<u8>> {
///         Ok(self.0.clone())
///     }
///     // metadata, get_cwd ...
/// }
/// ```
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Missing paths report [`RuntimeError::FileNotFound`], which is how the
    /// resolver probes for candidates.
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Directory that relative entries and the default base resolve against.
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}
