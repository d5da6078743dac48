//! fob-manifest CLI entry point.
//!
//! Parses arguments, installs logging and dispatches to a command.

use anyhow::Result;
use clap::Parser;
use fob_manifest_cli::{cli, commands, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    match args.command {
        cli::Command::Inject(inject_args) => {
            commands::InjectCommand::new(inject_args, args.config).run().await
        }
        cli::Command::Graph(graph_args) => {
            commands::GraphCommand::new(graph_args, args.config).run().await
        }
    }
}
