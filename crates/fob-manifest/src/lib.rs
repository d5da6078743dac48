//! # fob-manifest
//!
//! Build-time import manifests for TypeScript/JSX sources.
//!
//! A source file containing the marker `/* inject */ {}` gets its own
//! transitive import tree spliced in as a JSON literal:
//!
//! ```text
//! export const manifest = /* inject */ {};
//! // becomes
//! export const manifest = /* inject */ {"modules":[{"path":"/app/src/page.tsx","request":"src/page.tsx","imports":[...]}]};
//! ```
//!
//! The pipeline is:
//!
//! - [`extract`] parses a file with oxc and lists its value import specifiers
//! - [`resolver`] maps a specifier to a file (extensions, index files, packages, aliases)
//! - [`traverse`] walks the tree concurrently, cycle-safe, restricted to the source root
//! - [`inject`] splices the serialized [`Manifest`] at the marker, with a boundary source map
//! - [`loader`] ties these together behind the host contract
//!
//! Broken or missing dependencies shrink the manifest instead of failing the
//! build. Only failures outside graph construction surface as errors.

pub mod config;
pub mod error;
pub mod extract;
pub mod inject;
pub mod loader;
pub mod module;
pub mod resolver;
pub mod runtime;
pub mod traverse;

pub use config::{ManifestConfig, ManifestFormat, OutsideRootPolicy};
pub use error::{ConfigError, ExtractError, InjectError, LoaderError, TraverseError};
pub use inject::{InjectOptions, Injection, find_marker, has_marker, inject, inject_required};
pub use loader::{DependencyTracker, ManifestLoader, TransformOutput};
pub use module::{FlatEntry, FlatManifest, Manifest, ModuleNode};
pub use resolver::ModuleResolver;
pub use runtime::native::NativeRuntime;
pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
pub use traverse::{Traversal, build_tree};

#[cfg(test)]
mod tests;
