use std::io::Write;

use tracing::debug;

use crate::{
    ChartConfig, Coordinates, HourlySeries, emit::emit, error::Result, provider::ForecastSource,
    render::render,
};

/// Fetch, extract and render; returns the encoded image without writing it.
pub async fn chart_image(
    source: &dyn ForecastSource,
    coords: Coordinates,
    config: &ChartConfig,
) -> Result<Vec<u8>> {
    let response = source.hourly_temperature(coords).await?;
    let series = HourlySeries::from_response(response, config.ticks.needs_datetimes())?;
    debug!(samples = series.len(), "extracted hourly series");

    render(&series, coords, config)
}

/// One full run: the image reaches `out` only once it has been rendered
/// completely, so any failure leaves `out` untouched.
pub async fn run<W: Write>(
    source: &dyn ForecastSource,
    coords: Coordinates,
    config: &ChartConfig,
    out: W,
) -> Result<()> {
    let image = chart_image(source, coords, config).await?;
    emit(&image, out)?;
    Ok(())
}
