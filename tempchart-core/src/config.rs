use std::time::Duration;

/// Public Open-Meteo forecast endpoint.
pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Upper bound for the single forecast request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how long to wait for the forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_FORECAST_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// How the x-axis is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPolicy {
    /// Raw timestamp strings at evenly spaced sample indices.
    Default,
    /// Date-aware ticks (4-8) labeled with the smallest component that changes.
    Concise,
    /// One tick every `hours` hours, labeled `"<Month> <Day>\n<Hour>:<Minute>"`.
    FixedInterval { hours: u32 },
}

impl TickPolicy {
    /// Date-aware policies need the timestamps parsed before rendering.
    pub fn needs_datetimes(&self) -> bool {
        !matches!(self, TickPolicy::Default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart settings; each binary runs with one fixed preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartConfig {
    pub ticks: TickPolicy,
    pub format: ImageFormat,
}

impl ChartConfig {
    pub const DEFAULT_PNG: ChartConfig = ChartConfig {
        ticks: TickPolicy::Default,
        format: ImageFormat::Png,
    };

    pub const CONCISE_PNG: ChartConfig = ChartConfig {
        ticks: TickPolicy::Concise,
        format: ImageFormat::Png,
    };

    pub const INTERVAL_SVG: ChartConfig = ChartConfig {
        ticks: TickPolicy::FixedInterval { hours: 6 },
        format: ImageFormat::Svg,
    };

    pub const fn presets() -> &'static [ChartConfig] {
        &[
            ChartConfig::DEFAULT_PNG,
            ChartConfig::CONCISE_PNG,
            ChartConfig::INTERVAL_SVG,
        ]
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig::DEFAULT_PNG
    }
}
