use anyhow::{Context, Result};
use fob_manifest::ManifestLoader;
use tokio::fs;
use tracing::info;

use crate::cli::{ConfigArgs, GraphArgs};
use crate::commands::entry_path;
use crate::config::load_config;

pub struct GraphCommand {
    args: GraphArgs,
    config: ConfigArgs,
}

impl GraphCommand {
    pub fn new(args: GraphArgs, config: ConfigArgs) -> Self {
        Self { args, config }
    }

    pub async fn run(self) -> Result<()> {
        let config = load_config(&self.config)?;
        let file = entry_path(&self.args.file)?;
        fs::metadata(&file)
            .await
            .with_context(|| format!("Entry not found: {}", file.display()))?;

        let loader = ManifestLoader::native(config);
        let manifest = loader
            .build_manifest(&file)
            .await
            .with_context(|| format!("Failed to build manifest for {}", file.display()))?;
        if let Some(root) = manifest.root() {
            info!(modules = root.distinct_paths().len(), "built manifest");
        }

        let json = if self.args.pretty {
            let config = loader.config();
            manifest.to_json_pretty(config.format, |path| config.is_tracked(path))?
        } else {
            loader.manifest_json(&manifest)?
        };
        println!("{json}");
        Ok(())
    }
}
