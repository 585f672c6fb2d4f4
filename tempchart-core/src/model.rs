use serde::Deserialize;
use std::fmt;

/// A latitude/longitude pair, passed through to the API unchecked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Formats a coordinate the way it was typed: shortest round-trip form,
/// always with a fractional part (`52.52`, `13.0`). Very small or large
/// values use a signed two-digit exponent (`1e-05`, `1.5e+16`).
pub fn format_coordinate(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            format_coordinate(self.latitude),
            format_coordinate(self.longitude)
        )
    }
}

/// Body of a `/v1/forecast?hourly=temperature_2m` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub hourly: Hourly,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hourly {
    /// ISO-8601 local date-times without offset, e.g. `2025-06-05T00:00`.
    pub time: Vec<String>,
    /// Degrees Celsius; `null` where the model has no value for that hour.
    pub temperature_2m: Vec<Option<f64>>,
}
