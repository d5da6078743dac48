//! Host-facing transform.
//!
//! A build tool hands over a file's text and absolute path plus a way to record
//! build dependencies. The loader returns rewritten text (and a map) or an
//! error, never partial output.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ManifestConfig;
use crate::error::LoaderError;
use crate::inject::{InjectOptions, has_marker, inject_required};
use crate::module::Manifest;
use crate::runtime::Runtime;
use crate::runtime::native::NativeRuntime;
use crate::traverse::Traversal;

/// Receives every file the transform read, so the host can rebuild when any
/// of them changes.
pub trait DependencyTracker: Send {
    fn add_dependency(&mut self, path: &Path);
}

impl DependencyTracker for Vec<PathBuf> {
    fn add_dependency(&mut self, path: &Path) {
        self.push(path.to_path_buf());
    }
}

/// Result of [`ManifestLoader::transform`].
#[derive(Debug)]
pub struct TransformOutput<'a> {
    /// Rewritten text, or the input itself when there was no marker.
    pub code: Cow<'a, str>,
    /// Source map JSON, when enabled and the text changed.
    pub map: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ManifestLoader {
    config: Arc<ManifestConfig>,
    runtime: Arc<dyn Runtime>,
}

impl ManifestLoader {
    pub fn new(config: ManifestConfig, runtime: Arc<dyn Runtime>) -> Self {
        Self {
            config: Arc::new(config),
            runtime,
        }
    }

    /// Loader over the real filesystem.
    pub fn native(config: ManifestConfig) -> Self {
        Self::new(config, Arc::new(NativeRuntime::new()))
    }

    pub fn config(&self) -> &ManifestConfig {
        &self.config
    }

    /// Traverse from `path` with a fresh visited set and resolver cache.
    pub async fn build_manifest(&self, path: &Path) -> Result<Manifest, LoaderError> {
        let traversal = Traversal::new(Arc::clone(&self.config), Arc::clone(&self.runtime))
            .map_err(|source| LoaderError::Traverse {
                path: path.to_path_buf(),
                source,
            })?;
        let root = traversal
            .run(path)
            .await
            .map_err(|source| LoaderError::Traverse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Manifest::new(root))
    }

    /// Serialize a manifest in the configured format.
    pub fn manifest_json(&self, manifest: &Manifest) -> Result<String, LoaderError> {
        let json = manifest.to_json(self.config.format, |path| self.config.is_tracked(path))?;
        Ok(json)
    }

    /// Inject the manifest of `resource_path` into `source`.
    ///
    /// Files without the marker come back untouched and declare no
    /// dependencies. Otherwise every distinct node path is declared through
    /// `deps` before the rewritten text is returned.
    pub async fn transform<'a>(
        &self,
        source: &'a str,
        resource_path: &Path,
        deps: &mut dyn DependencyTracker,
    ) -> Result<TransformOutput<'a>, LoaderError> {
        if !has_marker(source) {
            debug!(path = %resource_path.display(), "no injection marker, skipping");
            return Ok(TransformOutput {
                code: Cow::Borrowed(source),
                map: None,
            });
        }

        let manifest = self.build_manifest(resource_path).await?;
        if let Some(root) = manifest.root() {
            let paths = root.distinct_paths();
            info!(
                path = %resource_path.display(),
                modules = paths.len(),
                "injecting manifest"
            );
            for path in paths {
                deps.add_dependency(path);
            }
        }

        let json = self.manifest_json(&manifest)?;
        let options = InjectOptions {
            filename: Some(resource_path.to_string_lossy().into_owned()),
            sourcemap: self.config.sourcemap,
        };
        let injection = inject_required(source, &json, &options)?;

        Ok(TransformOutput {
            code: injection.code,
            map: injection.map.map(|map| map.to_json_string()),
        })
    }
}
