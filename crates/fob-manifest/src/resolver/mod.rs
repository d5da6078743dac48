//! Specifier resolution.
//!
//! Maps `(context directory, specifier)` to one absolute file, mirroring the
//! Node.js / enhanced-resolve search:
//!
//! 1. Path aliases rewrite the specifier relative to the base directory
//! 2. Relative and absolute specifiers resolve against the context directory
//! 3. Candidates are tried verbatim, then with each extension appended
//! 4. Directories resolve through package entry fields, then `index<ext>`
//! 5. Bare specifiers search `<ancestor>/<package dir>/<name>` upwards
//!
//! Resolution never fails loudly. Every probe error collapses to `None` and
//! the caller drops the edge.

mod aliases;
mod extensions;
mod package;

pub use aliases::resolve_path_alias;
pub use extensions::{is_dir, is_file, try_extensions, try_index_files};
pub use package::{PACKAGE_JSON, PackageManifest, split_bare_specifier};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use path_clean::PathClean;
use tracing::trace;

use crate::config::ManifestConfig;
use crate::runtime::Runtime;

/// Module resolver with memoized probes.
///
/// A resolver is scoped to one traversal: the caches are never invalidated,
/// so reusing a resolver across filesystem changes would return stale paths.
#[derive(Debug)]
pub struct ModuleResolver {
    config: Arc<ManifestConfig>,
    runtime: Arc<dyn Runtime>,
    base: PathBuf,
    resolved: DashMap<(PathBuf, String), Option<PathBuf>>,
    packages: DashMap<PathBuf, Option<Arc<PackageManifest>>>,
}

impl ModuleResolver {
    /// Create a resolver. `base` anchors path aliases.
    pub fn new(config: Arc<ManifestConfig>, runtime: Arc<dyn Runtime>, base: PathBuf) -> Self {
        Self {
            config,
            runtime,
            base,
            resolved: DashMap::new(),
            packages: DashMap::new(),
        }
    }

    /// Resolve `specifier` as requested from a file in `context`.
    ///
    /// Returns the cleaned absolute path of the resolved file, or `None`.
    pub async fn resolve(&self, context: &Path, specifier: &str) -> Option<PathBuf> {
        let key = (context.to_path_buf(), specifier.to_string());
        if let Some(hit) = self.resolved.get(&key) {
            trace!(specifier, context = %context.display(), "resolver cache hit");
            return hit.value().clone();
        }

        let result = self.resolve_uncached(context, specifier).await;
        self.resolved.insert(key, result.clone());
        result
    }

    async fn resolve_uncached(&self, context: &Path, specifier: &str) -> Option<PathBuf> {
        if specifier.is_empty() {
            return None;
        }

        if let Some(rewritten) = resolve_path_alias(specifier, &self.config.aliases) {
            let candidate = self.base.join(rewritten).clean();
            return self.resolve_path(&candidate).await;
        }

        if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
            let candidate = context.join(specifier).clean();
            return self.resolve_path(&candidate).await;
        }

        self.resolve_bare(context, specifier).await
    }

    /// Resolve a filesystem candidate: file, file plus extension, then directory.
    async fn resolve_path(&self, candidate: &Path) -> Option<PathBuf> {
        let runtime = self.runtime.as_ref();
        let extensions = &self.config.extensions;

        if let Some(file) = try_extensions(candidate, extensions, runtime).await {
            return Some(file);
        }

        if !is_dir(candidate, runtime).await {
            return None;
        }

        if let Some(package) = self.package(candidate).await {
            for entry in package.entry_points(&self.config.main_fields) {
                let target = candidate.join(entry).clean();
                if let Some(file) = try_extensions(&target, extensions, runtime).await {
                    return Some(file);
                }
                if let Some(file) = try_index_files(&target, extensions, runtime).await {
                    return Some(file);
                }
            }
        }

        try_index_files(candidate, extensions, runtime).await
    }

    /// Search package directories from `context` up to the filesystem root.
    async fn resolve_bare(&self, context: &Path, specifier: &str) -> Option<PathBuf> {
        let (name, subpath) = split_bare_specifier(specifier)?;

        for dir in context.ancestors() {
            for package_dir in &self.config.package_dirs {
                let package_root = dir.join(package_dir).join(name);
                if !is_dir(&package_root, self.runtime.as_ref()).await {
                    continue;
                }

                trace!(specifier, package_root = %package_root.display(), "found package directory");
                let candidate = match subpath {
                    Some(subpath) => package_root.join(subpath).clean(),
                    None => package_root,
                };
                if let Some(file) = self.resolve_path(&candidate).await {
                    return Some(file);
                }
            }
        }

        None
    }

    /// Cached package metadata for a directory.
    async fn package(&self, dir: &Path) -> Option<Arc<PackageManifest>> {
        if let Some(hit) = self.packages.get(dir) {
            return hit.value().clone();
        }

        let loaded = PackageManifest::load(dir, self.runtime.as_ref())
            .await
            .map(Arc::new);
        self.packages.insert(dir.to_path_buf(), loaded.clone());
        loaded
    }
}
