use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a forecast from becoming a chart.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to send request to Open-Meteo: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid forecast URL {0}")]
    Url(String),

    #[error("Open-Meteo request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse Open-Meteo forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "Forecast series have different lengths: {times} timestamps vs {temperatures} temperatures"
    )]
    LengthMismatch { times: usize, temperatures: usize },

    #[error("Forecast response contained no hourly data")]
    EmptySeries,

    #[error("Invalid timestamp {value:?} at index {index}")]
    Timestamp {
        index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to draw chart: {0}")]
    Render(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ForecastError> = std::result::Result<T, E>;
