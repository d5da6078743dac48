//! Configuration loading for the CLI.
//!
//! Flags are the highest-priority figment layer on top of the library's
//! defaults, `fob-manifest.toml` and `FOB_MANIFEST_*` variables. Flags that
//! were not given are left out of the layer entirely.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::Serialized;
use fob_manifest::{ManifestConfig, ManifestFormat, OutsideRootPolicy};
use serde::Serialize;

use crate::cli::ConfigArgs;

/// Explicit flag values.
#[derive(Debug, Default, Serialize)]
struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<ManifestFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_counts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outside_root: Option<OutsideRootPolicy>,
}

impl ConfigOverrides {
    fn from_args(args: &ConfigArgs, cwd: &Path) -> Self {
        Self {
            base: args.base.as_ref().map(|base| absolutize(base, cwd)),
            source_dir: args.source_dir.clone(),
            format: args.format.map(Into::into),
            line_counts: args.line_counts.then_some(true),
            outside_root: args.outside_root.map(Into::into),
        }
    }
}

/// Load the effective configuration for a CLI run.
///
/// The config file is looked up in `--base` (or the working directory)
/// unless `--config` names one.
pub fn load_config(args: &ConfigArgs) -> Result<ManifestConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let root = args
        .base
        .as_ref()
        .map_or_else(|| cwd.clone(), |base| absolutize(base, &cwd));
    let file = args.config.as_ref().map(|file| absolutize(file, &cwd));

    let figment = ManifestConfig::figment(&root, file.as_deref())
        .merge(Serialized::defaults(ConfigOverrides::from_args(args, &cwd)));

    let mut config =
        ManifestConfig::from_figment(figment).context("Failed to load fob-manifest configuration")?;
    if let Some(base) = config.base.take() {
        config.base = Some(absolutize(&base, &root));
    } else {
        config.base = Some(root);
    }
    Ok(config)
}

/// Resolve `path` against `cwd` when relative.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ManifestFormatArg, OutsideRootArg};

    #[test]
    fn test_unset_flags_are_not_serialized() {
        let overrides = ConfigOverrides::from_args(&ConfigArgs::default(), Path::new("/cwd"));
        let value = serde_json::to_value(&overrides).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = ConfigArgs {
            base: Some(PathBuf::from("web")),
            source_dir: Some("app".to_string()),
            format: Some(ManifestFormatArg::Flat),
            line_counts: true,
            outside_root: Some(OutsideRootArg::Omit),
            config: None,
        };
        let overrides = ConfigOverrides::from_args(&args, Path::new("/repo"));

        let figment = ManifestConfig::figment(Path::new("/nonexistent"), None)
            .merge(Serialized::defaults(overrides));
        let config = ManifestConfig::from_figment(figment).unwrap();

        assert_eq!(config.base, Some(PathBuf::from("/repo/web")));
        assert_eq!(config.source_dir, "app");
        assert_eq!(config.format, ManifestFormat::Flat);
        assert!(config.line_counts);
        assert_eq!(config.outside_root, OutsideRootPolicy::Omit);
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize(Path::new("a/b"), Path::new("/x")),
            PathBuf::from("/x/a/b")
        );
        assert_eq!(
            absolutize(Path::new("/abs"), Path::new("/x")),
            PathBuf::from("/abs")
        );
    }
}
