//! Weather tool set. Payloads from WeatherAPI are passed through as parsed JSON.

use std::sync::Arc;

use async_trait::async_trait;
use mcp_adapters_core::{
    CoreError, CoreResult, ToolDescriptor, ToolOutput, ToolRegistry, ToolSet, parse_arguments,
};
use mcp_adapters_provider::{CredentialProvider, MAX_FORECAST_DAYS, WeatherConfig, WeatherSource};
use serde_json::Value;

use crate::schemas::{CurrentWeatherParams, ForecastParams};

pub const GET_CURRENT_WEATHER: &str = "get_current_weather";
pub const GET_WEATHER_FORECAST: &str = "get_weather_forecast";

type ConfigProvider = dyn CredentialProvider<Credential = Arc<WeatherConfig>>;

/// The weather adapter's tools.
pub struct WeatherTools {
    registry: ToolRegistry,
    credentials: Arc<ConfigProvider>,
    source: Arc<dyn WeatherSource>,
}

impl WeatherTools {
    pub fn new(credentials: Arc<ConfigProvider>, source: Arc<dyn WeatherSource>) -> Self {
        Self {
            registry: registry(),
            credentials,
            source,
        }
    }

    async fn config(&self) -> CoreResult<Arc<WeatherConfig>> {
        self.credentials
            .ensure_credential()
            .await
            .map_err(CoreError::Credential)
    }

    async fn current_weather(&self, params: CurrentWeatherParams) -> CoreResult<ToolOutput> {
        let config = self.config().await?;
        let payload = self
            .source
            .current_weather(&config, &params.location)
            .await
            .map_err(CoreError::upstream("Current weather"))?;
        Ok(ToolOutput::Json(payload))
    }

    async fn forecast(&self, params: ForecastParams) -> CoreResult<ToolOutput> {
        let config = self.config().await?;
        let days = clamp_days(params.days);
        log::debug!("Forecast for '{}' over {days} day(s)", params.location);
        let payload = self
            .source
            .forecast(&config, &params.location, days)
            .await
            .map_err(CoreError::upstream("Forecast"))?;
        Ok(ToolOutput::Json(payload))
    }
}

#[async_trait]
impl ToolSet for WeatherTools {
    fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    async fn invoke(&self, name: &str, arguments: Value) -> CoreResult<ToolOutput> {
        match name {
            GET_CURRENT_WEATHER => self.current_weather(parse_arguments(name, arguments)?).await,
            GET_WEATHER_FORECAST => self.forecast(parse_arguments(name, arguments)?).await,
            other => Err(CoreError::UnknownTool(other.to_string())),
        }
    }
}

fn registry() -> ToolRegistry {
    ToolRegistry::new()
        .with(ToolDescriptor::for_params::<CurrentWeatherParams>(
            GET_CURRENT_WEATHER,
            "Get current weather for a location",
        ))
        .with(ToolDescriptor::for_params::<ForecastParams>(
            GET_WEATHER_FORECAST,
            "Get weather forecast for a location",
        ))
}

/// Any integer maps into `1..=MAX_FORECAST_DAYS`.
fn clamp_days(days: i64) -> u8 {
    let days = days.clamp(1, i64::from(MAX_FORECAST_DAYS));
    u8::try_from(days).unwrap_or(MAX_FORECAST_DAYS)
}

#[cfg(test)]
#[path = "tools_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
