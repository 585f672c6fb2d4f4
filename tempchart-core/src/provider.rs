use crate::{Coordinates, ForecastResponse, error::Result};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

pub use openmeteo::OpenMeteoClient;

/// Anything that can answer an hourly temperature forecast for a location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn hourly_temperature(&self, coords: Coordinates) -> Result<ForecastResponse>;
}
