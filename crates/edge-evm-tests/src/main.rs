//! edge-vmtest binary
//!
//! Runs VM fixtures from a file or directory and prints a summary. Exits
//! with an error when any fixture fails.

mod cli;

use anyhow::{bail, Result};
use cli::Cli;
use edge_evm_tests::TestRunner;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let runner = TestRunner::new(cli.verbose).with_fork_block(cli.fork_block);
    let stats = runner.run_vm_tests(&cli.fixtures)?;
    stats.print_summary();

    if stats.failed > 0 {
        bail!("{} of {} fixtures failed", stats.failed, stats.total);
    }
    Ok(())
}
