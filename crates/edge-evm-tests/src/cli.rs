//! CLI argument parsing for edge-vmtest

use clap::Parser;
use std::path::PathBuf;

/// Run EVM JSON fixtures against the Edge engine
#[derive(Parser, Debug, Clone)]
#[command(name = "edge-vmtest")]
#[command(about = "Run EVM JSON fixtures against the Edge engine")]
#[command(version)]
pub struct Cli {
    /// Fixture file, or directory searched recursively for *.json
    #[arg(long, default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Resolve fork schedules at this block instead of each fixture's current block
    #[arg(long)]
    pub fork_block: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log every passing test and per-file failure counts
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
