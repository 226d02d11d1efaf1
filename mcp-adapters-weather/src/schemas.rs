//! MCP tool parameter schemas for the weather tools.

use schemars::JsonSchema;
use serde::Deserialize;

/// Default forecast length in days.
pub const DEFAULT_FORECAST_DAYS: i64 = 3;

const fn default_days() -> i64 {
    DEFAULT_FORECAST_DAYS
}

/// Parameters for `get_current_weather` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CurrentWeatherParams {
    #[schemars(description = "City name or coordinates")]
    pub location: String,
}

/// Parameters for `get_weather_forecast` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ForecastParams {
    #[schemars(description = "City name or coordinates")]
    pub location: String,

    /// Out-of-range values are clamped, not rejected.
    #[schemars(description = "Number of forecast days (1-10)")]
    #[serde(default = "default_days")]
    pub days: i64,
}
