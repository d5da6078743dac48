//! Manifest data model.
//!
//! The traversal returns a tree of [`ModuleNode`]s. A path can appear more
//! than once across branches; every occurrence after the first is a stub with
//! no imports.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::ManifestFormat;
use crate::error::InjectError;

/// One visited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Absolute, normalized path.
    pub path: PathBuf,
    /// The specifier as written by the importer, or the root request string.
    pub request: String,
    /// Children in source order.
    pub imports: Vec<ModuleNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
}

impl ModuleNode {
    /// A node with no imports.
    pub fn leaf(path: impl Into<PathBuf>, request: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            request: request.into(),
            imports: Vec::new(),
            lines: None,
        }
    }

    pub fn with_lines(mut self, lines: Option<usize>) -> Self {
        self.lines = lines;
        self
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Total number of nodes in the tree, stubs included.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Distinct node paths in first-appearance (pre-order) order.
    pub fn distinct_paths(&self) -> Vec<&Path> {
        let mut seen = FxHashSet::default();
        self.iter()
            .map(|node| node.path.as_path())
            .filter(|path| seen.insert(*path))
            .collect()
    }

    /// Find the first node with the given path.
    pub fn find(&self, path: &Path) -> Option<&ModuleNode> {
        self.iter().find(|node| node.path == path)
    }
}

/// Pre-order traversal over a [`ModuleNode`] tree.
pub struct PreOrder<'a> {
    stack: Vec<&'a ModuleNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a ModuleNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.imports.iter().rev());
        Some(node)
    }
}

/// Canonical manifest: exactly one root entry, children nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub modules: Vec<ModuleNode>,
}

impl Manifest {
    pub fn new(root: ModuleNode) -> Self {
        Self {
            modules: vec![root],
        }
    }

    pub fn root(&self) -> Option<&ModuleNode> {
        self.modules.first()
    }

    /// Legacy flat shape: tracked nodes once each, pre-order, no hierarchy.
    pub fn to_flat(&self, is_tracked: impl Fn(&Path) -> bool) -> FlatManifest {
        let mut seen = FxHashSet::default();
        let modules = self
            .modules
            .iter()
            .flat_map(ModuleNode::iter)
            .filter(|node| is_tracked(&node.path) && seen.insert(node.path.as_path()))
            .map(|node| FlatEntry {
                path: node.path.clone(),
                request: node.request.clone(),
            })
            .collect();
        FlatManifest { modules }
    }

    /// Serialize in the requested shape as compact JSON.
    pub fn to_json(
        &self,
        format: ManifestFormat,
        is_tracked: impl Fn(&Path) -> bool,
    ) -> Result<String, InjectError> {
        self.encode(format, is_tracked, false)
    }

    /// Serialize in the requested shape, indented for reading.
    pub fn to_json_pretty(
        &self,
        format: ManifestFormat,
        is_tracked: impl Fn(&Path) -> bool,
    ) -> Result<String, InjectError> {
        self.encode(format, is_tracked, true)
    }

    fn encode(
        &self,
        format: ManifestFormat,
        is_tracked: impl Fn(&Path) -> bool,
        pretty: bool,
    ) -> Result<String, InjectError> {
        fn write<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
            if pretty {
                serde_json::to_string_pretty(value)
            } else {
                serde_json::to_string(value)
            }
        }

        let json = match format {
            ManifestFormat::Nested => write(self, pretty)?,
            ManifestFormat::Flat => write(&self.to_flat(is_tracked), pretty)?,
        };
        Ok(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatManifest {
    pub modules: Vec<FlatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub path: PathBuf,
    pub request: String,
}
