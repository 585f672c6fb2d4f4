use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    Coordinates, ForecastResponse,
    config::FetchConfig,
    error::{ForecastError, Result},
    model::format_coordinate,
};

use super::ForecastSource;

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url,
            http,
        })
    }

    /// Same client, pointed at another endpoint (a mock server, a mirror).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full request URL for `coords`.
    pub fn forecast_url(&self, coords: Coordinates) -> Result<Url> {
        let latitude = format_coordinate(coords.latitude);
        let longitude = format_coordinate(coords.longitude);

        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", "temperature_2m"),
            ],
        )
        .map_err(|e| ForecastError::Url(format!("{}: {e}", self.base_url)))?;

        Ok(url)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn hourly_temperature(&self, coords: Coordinates) -> Result<ForecastResponse> {
        let url = self.forecast_url(coords)?;
        debug!(%url, "requesting hourly forecast");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        debug!(
            times = parsed.hourly.time.len(),
            temperatures = parsed.hourly.temperature_2m.len(),
            "decoded forecast"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
