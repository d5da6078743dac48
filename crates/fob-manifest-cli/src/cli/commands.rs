use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inject the manifest into a file at its marker
    ///
    /// Files without `/* inject */ {}` are written back unchanged unless
    /// `--check` is given.
    Inject(InjectArgs),

    /// Print the manifest for a file without injecting it
    Graph(GraphArgs),
}

/// Arguments for the inject command
#[derive(Args, Debug, Clone)]
pub struct InjectArgs {
    /// Source file to transform
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the rewritten file here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Also write a source map to `<out>.map`
    #[arg(long, requires = "out")]
    pub map: bool,

    /// Fail if the file has no injection marker
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Entry file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}
