//! Import graph traversal.
//!
//! A traversal runs in two passes. Discovery claims each path once, reads and
//! parses it, resolves its specifiers and records the surviving edges. Sibling
//! files are resolved and discovered concurrently with `join_all` on the
//! caller's task. Assembly then walks the recorded edges synchronously in
//! pre-order: the first occurrence of a path is expanded and every later one,
//! including a cycle back into an ancestor, becomes a stub with no imports.
//!
//! Each path's record depends only on its own contents, and assembly never
//! looks at completion order, so the same tree of files always yields the
//! same manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, join_all};
use parking_lot::Mutex;
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::config::{ManifestConfig, OutsideRootPolicy, is_script};
use crate::error::TraverseError;
use crate::extract::extract_imports;
use crate::module::ModuleNode;
use crate::resolver::ModuleResolver;
use crate::runtime::Runtime;

/// What discovery learned about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ModuleRecord {
    lines: Option<usize>,
    /// Retained `(specifier, target)` edges in source order.
    edges: Vec<(String, PathBuf)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Finalized(Arc<ModuleRecord>),
}

/// A single traversal over one entry file.
///
/// Owns the visited set and the resolver caches, so both live exactly as long
/// as one run. Construct a new `Traversal` per entry.
#[derive(Debug)]
pub struct Traversal {
    config: Arc<ManifestConfig>,
    runtime: Arc<dyn Runtime>,
    resolver: ModuleResolver,
    base: PathBuf,
    visited: Mutex<FxHashMap<PathBuf, VisitState>>,
}

impl Traversal {
    /// Prepare a traversal. The base directory is `config.base` (made absolute
    /// against the runtime's working directory) or the working directory itself.
    pub fn new(
        config: Arc<ManifestConfig>,
        runtime: Arc<dyn Runtime>,
    ) -> Result<Self, TraverseError> {
        let base = match &config.base {
            Some(base) if base.is_absolute() => base.clean(),
            Some(base) => runtime
                .get_cwd()
                .map_err(TraverseError::CurrentDir)?
                .join(base)
                .clean(),
            None => runtime.get_cwd().map_err(TraverseError::CurrentDir)?,
        };

        let resolver = ModuleResolver::new(Arc::clone(&config), Arc::clone(&runtime), base.clone());

        Ok(Self {
            config,
            runtime,
            resolver,
            base,
            visited: Mutex::new(FxHashMap::default()),
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Build the import tree rooted at `entry`.
    ///
    /// The root is always returned, even when it lies outside the tracked
    /// source root or cannot be read.
    pub async fn run(self, entry: &Path) -> Result<ModuleNode, TraverseError> {
        let entry = self.normalize(entry);
        let request = self.root_request(&entry);
        debug!(entry = %entry.display(), request, "starting traversal");

        self.discover(entry.clone()).await?;
        let root = self.assemble(entry, request);

        debug!(
            modules = self.visited.lock().len(),
            nodes = root.count(),
            "traversal finished"
        );
        Ok(root)
    }

    /// Record `path` and everything reachable from it. Paths already claimed
    /// by another branch are skipped.
    fn discover(&self, path: PathBuf) -> BoxFuture<'_, Result<(), TraverseError>> {
        async move {
            if !self.claim(&path)? {
                return Ok(());
            }

            if !self.config.is_tracked(&path) {
                debug!(path = %path.display(), "leaf outside source root");
                self.finalize(&path, ModuleRecord::default());
                return Ok(());
            }

            let Some(source) = self.read_source(&path).await else {
                self.finalize(&path, ModuleRecord::default());
                return Ok(());
            };
            let lines = self.config.line_counts.then(|| source.lines().count());

            if !is_script(&path) {
                self.finalize(&path, ModuleRecord { lines, edges: Vec::new() });
                return Ok(());
            }

            let specifiers = match extract_imports(&source) {
                Ok(specifiers) => specifiers,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "treating unparsable module as having no imports");
                    Vec::new()
                }
            };
            drop(source);
            debug!(path = %path.display(), imports = specifiers.len(), "visiting module");

            let edges = self.resolve_edges(&path, specifiers).await;
            let pending: Vec<_> = edges
                .iter()
                .map(|(_, target)| self.discover(target.clone()))
                .collect();
            for child in join_all(pending).await {
                child?;
            }

            self.finalize(&path, ModuleRecord { lines, edges });
            Ok(())
        }
        .boxed()
    }

    /// Resolve `specifiers` concurrently and keep the edges that belong in the
    /// manifest, in source order.
    async fn resolve_edges(&self, path: &Path, specifiers: Vec<String>) -> Vec<(String, PathBuf)> {
        let context = path.parent().unwrap_or(path).to_path_buf();
        let resolved = join_all(
            specifiers
                .iter()
                .map(|specifier| self.resolver.resolve(&context, specifier)),
        )
        .await;

        let mut edges = Vec::with_capacity(specifiers.len());
        for (specifier, target) in specifiers.into_iter().zip(resolved) {
            let Some(target) = target else {
                debug!(specifier, from = %path.display(), "dropping unresolved import");
                continue;
            };
            let target = self.normalize(&target);
            if !self.config.is_source_file(&target) {
                debug!(specifier, target = %target.display(), "dropping non-source import");
                continue;
            }
            if self.config.outside_root == OutsideRootPolicy::Omit
                && !self.config.is_tracked(&target)
            {
                debug!(specifier, target = %target.display(), "omitting dependency outside source root");
                continue;
            }
            edges.push((specifier, target));
        }
        edges
    }

    /// Build the tree for `path` from the discovered records.
    fn assemble(&self, path: PathBuf, request: String) -> ModuleNode {
        let visited = self.visited.lock();
        let mut expanded = FxHashSet::default();
        expand(&visited, &mut expanded, path, request)
    }

    /// Atomically check and mark `path`. Returns `false` if already claimed.
    fn claim(&self, path: &Path) -> Result<bool, TraverseError> {
        let mut visited = self.visited.lock();
        if visited.contains_key(path) {
            debug!(path = %path.display(), "already visited");
            return Ok(false);
        }
        if visited.len() >= self.config.max_modules {
            return Err(TraverseError::TooManyModules {
                count: visited.len(),
                max: self.config.max_modules,
            });
        }
        visited.insert(path.to_path_buf(), VisitState::InProgress);
        Ok(true)
    }

    fn finalize(&self, path: &Path, record: ModuleRecord) {
        if let Some(state) = self.visited.lock().get_mut(path) {
            *state = VisitState::Finalized(Arc::new(record));
        }
    }

    /// Read a file as UTF-8. Oversized, unreadable and non-UTF-8 files yield `None`.
    async fn read_source(&self, path: &Path) -> Option<String> {
        match self.runtime.metadata(path).await {
            Ok(metadata) if metadata.size > self.config.max_file_size => {
                warn!(
                    path = %path.display(),
                    size = metadata.size,
                    max = self.config.max_file_size,
                    "file too large, recording as leaf"
                );
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to stat module");
                return None;
            }
        }

        let bytes = match self.runtime.read_file(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read module");
                return None;
            }
        };

        match String::from_utf8(bytes) {
            Ok(source) => Some(source),
            Err(_) => {
                warn!(path = %path.display(), "module is not valid UTF-8");
                None
            }
        }
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.clean()
        } else {
            self.base.join(path).clean()
        }
    }

    /// Entry path relative to the base, or its file name when that is empty
    /// or not representable.
    fn root_request(&self, entry: &Path) -> String {
        entry
            .strip_prefix(&self.base)
            .ok()
            .and_then(Path::to_str)
            .filter(|relative| !relative.is_empty())
            .map(str::to_string)
            .or_else(|| {
                entry
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| entry.to_string_lossy().into_owned())
    }

    #[cfg(test)]
    fn state(&self, path: &Path) -> Option<VisitState> {
        self.visited.lock().get(path).cloned()
    }
}

/// Build the import tree for `entry` with a fresh traversal.
pub async fn build_tree(
    entry: &Path,
    config: Arc<ManifestConfig>,
    runtime: Arc<dyn Runtime>,
) -> Result<ModuleNode, TraverseError> {
    Traversal::new(config, runtime)?.run(entry).await
}


/// Pre-order expansion: the first occurrence of a path carries its imports,
/// later ones are stubs.
fn expand(
    records: &FxHashMap<PathBuf, VisitState>,
    expanded: &mut FxHashSet<PathBuf>,
    path: PathBuf,
    request: String,
) -> ModuleNode {
    if !expanded.insert(path.clone()) {
        return ModuleNode::leaf(path, request);
    }
    let Some(VisitState::Finalized(record)) = records.get(&path) else {
        return ModuleNode::leaf(path, request);
    };

    let imports = record
        .edges
        .iter()
        .map(|(specifier, target)| expand(records, expanded, target.clone(), specifier.clone()))
        .collect();
    ModuleNode {
        path,
        request,
        imports,
        lines: record.lines,
    }
}
