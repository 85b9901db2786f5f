/// CLI argument definitions for the `noisemap` command.
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::score::SortKey;

#[derive(Parser)]
#[command(
    name = "noisemap",
    version,
    disable_version_flag = true,
    about = "Codebase risk heatmap: complexity × churn per file",
    long_about = "\
Scan a source tree and rank files by risk.

Each file gets a complexity score (parsed for Go and Rust, line heuristic for
everything else) and a churn score (commits touching it in git history).
Both are scaled to the largest value in the scan and blended:

  Risk = 0.6 × complexity + 0.4 × churn

Bands:
  Critical  -- risk >= 80
  High      -- risk >= 60
  Medium    -- risk >= 30
  Low       -- below 30

Settings can also be placed in noisemap.toml at the scan root:

  ignore_dirs = [\"generated\"]
  sort_by = \"complexity\"
  top = 50"
)]
pub struct Cli {
    /// Directory to scan (default: current directory)
    pub path: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Sort by: risk, complexity, churn, or name (default: risk)
    #[arg(long)]
    pub sort_by: Option<SortKey>,

    /// Show only the top N files (default: 20)
    #[arg(long)]
    pub top: Option<usize>,

    /// Config file to use instead of <DIRECTORY>/noisemap.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}
