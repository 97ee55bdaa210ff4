//! Command-line entry point for mysql-perf-seed.

use clap::Parser;
use mysql_perf_seed::logging::init_tracing;
use mysql_perf_seed::setup::{log_dry_run, run_setup};
use mysql_perf_seed::SeedConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = SeedConfig::parse();

    if config.dry_run {
        log_dry_run(&config);
        return Ok(());
    }

    run_setup(&config).await?;
    Ok(())
}
