//! WeatherAPI.com client

mod error;
mod http;

use reqwest::Client;
use serde::Deserialize;

/// Upper bound on forecast days accepted by WeatherAPI.
pub const MAX_FORECAST_DAYS: u8 = 10;

/// WeatherAPI client implementing [`WeatherSource`](crate::WeatherSource).
///
/// Base URL, API key and timeout come from the [`WeatherConfig`](crate::WeatherConfig)
/// passed with each call.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    pub(crate) client: Client,
}

impl WeatherClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// `{"error": {"code": 1006, "message": "No matching location found."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherErrorResponse {
    pub error: WeatherErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherErrorBody {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}
