use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "maildex",
    about = "Message index builder with git object-store sources",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Repository metadata directory (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub git_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List messages in the repository that are not yet indexed
    Scan(ScanArgs),
    /// Print a blob's raw bytes to standard output
    Cat(CatArgs),
    /// Materialize a blob into a file
    Extract(ExtractArgs),
    /// Retrieve a blob and show it as a parsed message
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// File of already-indexed blob ids, one per line
    #[arg(long, value_name = "FILE")]
    pub known: Option<PathBuf>,
    /// Walk all history, ignoring the database timestamp
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct CatArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ExtractArgs {
    pub id: String,
    pub dest: PathBuf,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
}
