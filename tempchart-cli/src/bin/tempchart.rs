//! Hourly temperature chart as PNG, raw timestamp labels on the x-axis.

use clap::Parser;
use tempchart_cli::{cli::Cli, logging};
use tempchart_core::ChartConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cmd = Cli::parse();
    cmd.run(ChartConfig::DEFAULT_PNG).await
}
