//! Core library for the `tempchart` command-line tools.
//!
//! This crate defines:
//! - The Open-Meteo forecast client behind the [`ForecastSource`] seam
//! - Extraction of the hourly temperature series
//! - Tick placement and chart rendering to PNG or SVG
//!
//! The binaries in `tempchart-cli` only parse coordinates and call [`pipeline::run`].

pub mod config;
pub mod emit;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod series;
pub mod ticks;

pub use config::{ChartConfig, FetchConfig, ImageFormat, TickPolicy};
pub use error::ForecastError;
pub use model::{Coordinates, ForecastResponse, Hourly};
pub use provider::{ForecastSource, OpenMeteoClient};
pub use series::HourlySeries;
