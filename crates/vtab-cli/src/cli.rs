use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vtab",
    about = "vtab: path-addressed diff and merge for JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `merge`, `expand` and `refs` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse or apply a path
    #[command(subcommand)]
    Path(PathCommand),
    /// Show the structural diff between two documents
    Diff(DiffArgs),
    /// Merge documents into columns and classify changes
    Merge(MergeArgs),
    /// Expand references using a directory of JSON documents
    Expand(ExpandArgs),
}

#[derive(Subcommand)]
pub enum PathCommand {
    /// Show the elements of a path
    Parse { path: String },
    /// Print the value a path addresses in a document
    Get { path: String, file: PathBuf },
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// Include unchanged entries
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Compare every column against the first instead of its predecessor
    #[arg(long)]
    pub baseline: bool,
    /// Only print rows with changes
    #[arg(long)]
    pub changed_only: bool,
}

#[derive(Args)]
pub struct ExpandArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Directory holding `<reference>.json` documents
    #[arg(long)]
    pub refs_dir: PathBuf,
    /// Additional references to resolve
    #[arg(long = "request")]
    pub requested: Vec<String>,
}
