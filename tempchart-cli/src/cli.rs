use anyhow::Context;
use clap::Parser;
use tempchart_core::{ChartConfig, Coordinates, FetchConfig, OpenMeteoClient, pipeline};
use tracing::debug;

/// Top-level CLI struct, shared by every binary.
#[derive(Debug, Parser)]
#[command(
    version,
    about = "Fetch the hourly temperature forecast and write a chart to stdout"
)]
pub struct Cli {
    /// Latitude of the location.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the location.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

impl Cli {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// Runs the pipeline once and writes the image to stdout.
    pub async fn run(self, config: ChartConfig) -> anyhow::Result<()> {
        let coords = self.coordinates();
        debug!(%coords, ?config, "starting");

        let client = OpenMeteoClient::new(FetchConfig::default())
            .context("Failed to build HTTP client")?;

        let stdout = std::io::stdout().lock();
        pipeline::run(&client, coords, &config, stdout)
            .await
            .with_context(|| format!("Failed to chart hourly temperature for {coords}"))?;

        Ok(())
    }
}
