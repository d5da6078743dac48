//! Configuration for manifest generation.
//!
//! Values are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `fob-manifest.toml` in the project root (or an explicit file)
//! 3. Environment variables prefixed with `FOB_MANIFEST_`
//! 4. Caller overrides merged on top of [`ManifestConfig::figment`]

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Conventional config file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "fob-manifest.toml";

/// Prefix for environment overrides (`FOB_MANIFEST_SOURCE_DIR=app`).
pub const ENV_PREFIX: &str = "FOB_MANIFEST_";

/// Default maximum number of visited paths per traversal.
pub const DEFAULT_MAX_MODULES: usize = 100_000;

/// Default maximum file size in bytes (10 MB). Larger files become leaves.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions the extractor parses. Other recognized extensions (such as
/// `.json`) are recorded as leaves without parsing.
const SCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// What to do with a dependency that resolves outside the tracked source root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutsideRootPolicy {
    /// Record the dependency as a leaf node with no imports.
    #[default]
    Leaf,
    /// Drop the edge entirely.
    Omit,
}

/// Serialized shape of the injected manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// `{"modules":[root]}` with children nested under `imports`.
    #[default]
    Nested,
    /// Legacy `{"modules":[{"path","request"}, ...]}` without hierarchy.
    Flat,
}

/// Options controlling resolution, traversal and injection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Extensions tried in priority order during resolution. A resolved file
    /// must carry one of these to become a node.
    pub extensions: Vec<String>,

    /// Directory name marking the tracked source root.
    pub source_dir: String,

    /// Directory names searched for bare (package) specifiers.
    pub package_dirs: Vec<String>,

    /// Package metadata fields consulted for a package entry point, in order.
    pub main_fields: Vec<String>,

    /// Path aliases (e.g., `"@"` → `"./src"`), resolved against `base`.
    pub aliases: IndexMap<String, String>,

    /// Base directory for the root request and alias targets. Defaults to the
    /// runtime's working directory.
    pub base: Option<PathBuf>,

    pub outside_root: OutsideRootPolicy,

    /// Populate `lines` on every node whose file was read.
    pub line_counts: bool,

    pub format: ManifestFormat,

    /// Produce a source map alongside rewritten text.
    pub sourcemap: bool,

    pub max_modules: usize,

    pub max_file_size: u64,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            extensions: [".ts", ".tsx", ".js", ".jsx", ".json"]
                .into_iter()
                .map(String::from)
                .collect(),
            source_dir: "src".to_string(),
            package_dirs: vec!["node_modules".to_string()],
            main_fields: vec!["module".to_string(), "main".to_string()],
            aliases: IndexMap::new(),
            base: None,
            outside_root: OutsideRootPolicy::Leaf,
            line_counts: false,
            format: ManifestFormat::Nested,
            sourcemap: true,
            max_modules: DEFAULT_MAX_MODULES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ManifestConfig {
    /// Build the layered figment for a project root.
    ///
    /// `file` replaces the conventional `fob-manifest.toml` lookup. Missing
    /// files are skipped, not errors.
    pub fn figment(root: &Path, file: Option<&Path>) -> Figment {
        let file = file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));

        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate configuration for a project root.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(root, None))
    }

    /// Extract and validate configuration from a prepared figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                hint: "at least one extension is required".to_string(),
            });
        }
        if let Some(ext) = self.extensions.iter().find(|ext| !ext.starts_with('.')) {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                hint: format!("`{ext}` must start with '.'"),
            });
        }
        if self.source_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source_dir".to_string(),
                hint: "source directory name cannot be empty".to_string(),
            });
        }
        if self.max_modules == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_modules".to_string(),
                hint: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Whether `path` lies inside the tracked source tree: some component is
    /// the source directory and no component is a package directory.
    pub fn is_tracked(&self, path: &Path) -> bool {
        let mut in_source = false;
        for component in path.components() {
            if let Component::Normal(name) = component {
                if self.package_dirs.iter().any(|dir| OsStr::new(dir) == name) {
                    return false;
                }
                if name == OsStr::new(&self.source_dir) {
                    in_source = true;
                }
            }
        }
        in_source
    }

    /// Whether `path` ends in one of the configured extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            return false;
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// Whether the extractor should parse `path` for imports.
pub fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}
