//! Filesystem runtime backed by `std::fs`.
//!
//! Every probe runs on tokio's blocking pool, so a slow disk stalls only the
//! traversal branch awaiting it. Not-found errors keep their own variant so
//! callers can tell "absent" from "unreadable".

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

/// Run a blocking filesystem call for `path` off the async executor.
async fn blocking<T, F>(path: &Path, action: &'static str, op: F) -> RuntimeResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Path) -> io::Result<T> + Send + 'static,
{
    let path = path.to_path_buf();
    task::spawn_blocking(move || op(&path).map_err(|e| io_error(path, action, e)))
        .await
        .map_err(|e| RuntimeError::Other(format!("blocking task failed: {e}")))?
}

fn io_error(path: PathBuf, action: &str, error: io::Error) -> RuntimeError {
    match error.kind() {
        io::ErrorKind::NotFound => RuntimeError::FileNotFound(path),
        _ => RuntimeError::Io(format!("{action} {}: {error}", path.display())),
    }
}

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        blocking(path, "failed to read", |path| std::fs::read(path)).await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        blocking(path, "failed to stat", |path| {
            std::fs::metadata(path).map(|metadata| FileMetadata {
                size: metadata.len(),
                is_dir: metadata.is_dir(),
                is_file: metadata.is_file(),
            })
        })
        .await
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir()
            .map_err(|e| RuntimeError::Io(format!("failed to read working directory: {e}")))
    }
}
