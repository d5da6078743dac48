use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use console::style;
use fob_manifest::{ManifestLoader, has_marker};
use tokio::fs;
use tracing::debug;

use crate::cli::{ConfigArgs, InjectArgs};
use crate::commands::entry_path;
use crate::config::load_config;

pub struct InjectCommand {
    args: InjectArgs,
    config: ConfigArgs,
}

impl InjectCommand {
    pub fn new(args: InjectArgs, config: ConfigArgs) -> Self {
        Self { args, config }
    }

    pub async fn run(self) -> Result<()> {
        let mut config = load_config(&self.config)?;
        // maps are only worth computing when they get written
        config.sourcemap = self.args.map;

        let file = entry_path(&self.args.file)?;
        let source = fs::read_to_string(&file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;

        if self.args.check && !has_marker(&source) {
            bail!("no `/* inject */ {{}}` marker in {}", file.display());
        }

        let loader = ManifestLoader::native(config);
        let mut dependencies: Vec<PathBuf> = Vec::new();
        let output = loader
            .transform(&source, &file, &mut dependencies)
            .await
            .with_context(|| format!("Failed to inject manifest into {}", file.display()))?;

        for dependency in &dependencies {
            debug!(dependency = %dependency.display(), "build dependency");
        }

        let Some(out) = &self.args.out else {
            print!("{}", output.code);
            return Ok(());
        };

        write_file(out, output.code.as_bytes()).await?;
        if let Some(map) = &output.map {
            write_file(&map_path(out), map.as_bytes()).await?;
        }

        eprintln!(
            "{} Injected {} module(s) into {}",
            style("✔").green().bold(),
            style(dependencies.len()).cyan(),
            style(out.display()).bold()
        );
        Ok(())
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// `dist/page.tsx` -> `dist/page.tsx.map`
fn map_path(out: &Path) -> PathBuf {
    let mut path = OsString::from(out.as_os_str());
    path.push(".map");
    PathBuf::from(path)
}
