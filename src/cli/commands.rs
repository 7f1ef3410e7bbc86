use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "orgtree", about = concat!("orgtree v", env!("CARGO_PKG_VERSION"), " - org-style outlines, parsed and written back"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keyword config file (default: nearest .orgtree.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .orgtree.toml in the current directory
    Init(InitArgs),
    /// Parse a file and print its tree
    Parse(FileArgs),
    /// Normalize a file's formatting
    Fmt(WriteArgs),
    /// Print the outline text for a JSON tree
    FromJson(FileArgs),
    /// Flip a heading between its todo and done keyword
    Toggle(ToggleArgs),
    /// Show done/total counts for headings with workflow children
    Progress(ProgressArgs),
    /// List scheduled and deadline items by date
    Agenda(FileArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing .orgtree.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct FileArgs {
    /// Outline file, or - for stdin
    pub file: PathBuf,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Outline file, or - for stdin
    pub file: PathBuf,
    /// Rewrite the file in place instead of printing
    #[arg(short, long)]
    pub write: bool,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Outline file
    pub file: PathBuf,
    /// Node path, e.g. 2.1 for the first child of the second heading
    pub path: String,
    /// Rewrite the file in place instead of printing
    #[arg(short, long)]
    pub write: bool,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Outline file, or - for stdin
    pub file: PathBuf,
    /// Count all descendants, not just direct children
    #[arg(short, long)]
    pub recursive: bool,
}
