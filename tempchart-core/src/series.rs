use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    ForecastResponse,
    error::{ForecastError, Result},
};

/// Open-Meteo's `iso8601` time format (no seconds, no offset).
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parallel timestamp/temperature samples pulled out of a forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    labels: Vec<String>,
    times: Option<Vec<DateTime<Utc>>>,
    temperatures: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Takes ownership of `hourly.time` and `hourly.temperature_2m`.
    ///
    /// With `parse_times`, every label must parse as an ISO-8601 date-time;
    /// one bad entry fails the whole series.
    pub fn from_response(response: ForecastResponse, parse_times: bool) -> Result<Self> {
        let hourly = response.hourly;

        if hourly.time.len() != hourly.temperature_2m.len() {
            return Err(ForecastError::LengthMismatch {
                times: hourly.time.len(),
                temperatures: hourly.temperature_2m.len(),
            });
        }
        if hourly.time.is_empty() {
            return Err(ForecastError::EmptySeries);
        }

        let times = if parse_times {
            let parsed = hourly
                .time
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    parse_timestamp(value).map_err(|source| ForecastError::Timestamp {
                        index,
                        value: value.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Some(parsed)
        } else {
            None
        };

        Ok(Self {
            labels: hourly.time,
            times,
            temperatures: hourly.temperature_2m,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Parsed timestamps, present only when requested at construction.
    pub fn times(&self) -> Option<&[DateTime<Utc>]> {
        self.times.as_deref()
    }

    pub fn temperatures(&self) -> &[Option<f64>] {
        &self.temperatures
    }

    /// Lowest and highest present sample, `None` when every hour is null.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.temperatures
            .iter()
            .flatten()
            .fold(None, |acc, &t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }
}

/// Parses an offset-less ISO-8601 timestamp, treating it as UTC.
pub fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, MINUTE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, SECOND_FORMAT))
        .map(|naive| naive.and_utc())
}
