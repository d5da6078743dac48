//! In-memory runtime for tests.
//!
//! Holds a flat map of absolute file paths to contents. Directories exist
//! implicitly whenever some file lives beneath them. Reads complete without
//! yielding, which keeps traversal order fully deterministic in tests.

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// In-memory filesystem implementing [`Runtime`].
///
/// ```rust,ignore
/// use fob_manifest::runtime::memory::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new("/project")
///     .with_file("/project/src/page.tsx", "import Test from './Test';")
///     .with_file("/project/src/Test.tsx", "export default 1;");
/// ```
#[derive(Debug, Default)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: FxHashMap<PathBuf, Vec<u8>>,
    unreadable: FxHashSet<PathBuf>,
}

impl MemoryRuntime {
    /// Create an empty tree whose working directory is `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Add a file with the given contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add a file that exists (and reports metadata) but fails every read.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files.insert(path.clone(), Vec::new());
        self.unreadable.insert(path);
        self
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(RuntimeError::Io(format!(
                "Permission denied: {}",
                path.display()
            )));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        if let Some(content) = self.files.get(path) {
            return Ok(FileMetadata {
                size: content.len() as u64,
                is_dir: false,
                is_file: true,
            });
        }
        if self.is_dir(path) {
            return Ok(FileMetadata {
                size: 0,
                is_dir: true,
                is_file: false,
            });
        }
        Err(RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
