// bases/make_ml_project/src/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Make the directory structure of a machine-learning project
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the project
    #[arg(short, long)]
    pub name: String,

    /// Directory the project is created in
    #[arg(short, long, default_value = ".")]
    pub destination: PathBuf,

    /// Create the destination directory if it does not exist
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Remote repository (e.g. on GitHub) to push the initial commit to
    #[arg(short = 'g', long, alias = "github_url", conflicts_with = "without_git")]
    pub github_url: Option<String>,

    /// Create the files without a git repository
    #[arg(long, alias = "without_git")]
    pub without_git: bool,

    /// Licence file to copy into the project (default: scripts/LICENCE, then MIT)
    #[arg(long)]
    pub licence: Option<PathBuf>,

    /// git executable
    #[arg(long, env = "GIT_PATH", default_value = "git")]
    pub git: PathBuf,

    /// Show what would be created without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
