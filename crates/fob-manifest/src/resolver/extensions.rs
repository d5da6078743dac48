//! Extension and index-file probing.
//!
//! Extensions are appended to the candidate rather than substituted, so
//! `./user.service` probes `user.service.ts` before giving up.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::runtime::Runtime;

/// Whether `path` is an existing regular file. Probe failures count as "no".
pub async fn is_file(path: &Path, runtime: &dyn Runtime) -> bool {
    runtime
        .metadata(path)
        .await
        .map(|metadata| metadata.is_file)
        .unwrap_or(false)
}

/// Whether `path` is an existing directory. Probe failures count as "no".
pub async fn is_dir(path: &Path, runtime: &dyn Runtime) -> bool {
    runtime
        .metadata(path)
        .await
        .map(|metadata| metadata.is_dir)
        .unwrap_or(false)
}

/// Try `base_path` verbatim, then with each extension appended in order.
pub async fn try_extensions(
    base_path: &Path,
    extensions: &[String],
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if is_file(base_path, runtime).await {
        return Some(base_path.to_path_buf());
    }

    for ext in extensions {
        let mut with_ext = OsString::from(base_path.as_os_str());
        with_ext.push(ext);
        let with_ext = PathBuf::from(with_ext);
        trace!(candidate = %with_ext.display(), "probing extension");
        if is_file(&with_ext, runtime).await {
            return Some(with_ext);
        }
    }

    None
}

/// Try `dir_path/index<ext>` for each extension in order.
pub async fn try_index_files(
    dir_path: &Path,
    extensions: &[String],
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if !is_dir(dir_path, runtime).await {
        return None;
    }

    for ext in extensions {
        let index = dir_path.join(format!("index{ext}"));
        if is_file(&index, runtime).await {
            return Some(index);
        }
    }

    None
}
