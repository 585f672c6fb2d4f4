//! Hourly temperature chart as PNG with concise date ticks.

use clap::Parser;
use tempchart_cli::{cli::Cli, logging};
use tempchart_core::ChartConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cmd = Cli::parse();
    cmd.run(ChartConfig::CONCISE_PNG).await
}
