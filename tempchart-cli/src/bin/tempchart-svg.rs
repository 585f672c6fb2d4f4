//! Hourly temperature chart as SVG, one tick every 6 hours.

use clap::Parser;
use tempchart_cli::{cli::Cli, logging};
use tempchart_core::ChartConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cmd = Cli::parse();
    cmd.run(ChartConfig::INTERVAL_SVG).await
}
