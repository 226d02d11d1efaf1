//! WeatherAPI HTTP request methods

use async_trait::async_trait;
use serde_json::Value;

use crate::config::WeatherConfig;
use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError, WeatherSource};
use crate::utils::log_sanitizer::{redact_query_param, truncate_for_log};

use super::{MAX_FORECAST_DAYS, WeatherClient, WeatherErrorResponse};

impl WeatherClient {
    /// `GET {base_url}/{endpoint}?key=..&q=..[&extra]`, returning the JSON body as is.
    async fn get(
        &self,
        config: &WeatherConfig,
        endpoint: &str,
        location: &str,
        extra: &[(&str, String)],
    ) -> Result<Value> {
        let mut params: Vec<(&str, &str)> = vec![("key", config.api_key.as_str()), ("q", location)];
        params.extend(extra.iter().map(|(k, v)| (*k, v.as_str())));

        let endpoint_url = format!("{}/{endpoint}", config.base_url());
        let url = url::Url::parse_with_params(&endpoint_url, &params).map_err(|e| {
            ProviderError::ConfigError {
                path: "base_url".to_string(),
                detail: format!("invalid base_url '{}': {e}", config.base_url),
            }
        })?;
        let url_for_log = redact_query_param(url.as_str(), "key");

        let request = self.client.get(url).timeout(config.timeout());
        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), "GET", &url_for_log).await?;

        if !(200..300).contains(&status) {
            return Err(self.api_error(status, &body, location));
        }
        HttpUtils::parse_json(&body, self.provider_name())
    }

    fn api_error(&self, status: u16, body: &str, location: &str) -> ProviderError {
        let raw = match serde_json::from_str::<WeatherErrorResponse>(body) {
            Ok(envelope) => {
                log::warn!(
                    "[{}] API error {} (HTTP {status}): {}",
                    self.provider_name(),
                    envelope.error.code,
                    envelope.error.message
                );
                RawApiError::with_code(envelope.error.code.to_string(), envelope.error.message)
            }
            Err(_) => {
                log::warn!(
                    "[{}] HTTP {status}: {}",
                    self.provider_name(),
                    truncate_for_log(body)
                );
                RawApiError::new(format!("HTTP {status}"))
            }
        };
        self.map_error(raw, ErrorContext::for_resource(location, status))
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn current_weather(&self, config: &WeatherConfig, location: &str) -> Result<Value> {
        self.get(config, "current.json", location, &[]).await
    }

    async fn forecast(&self, config: &WeatherConfig, location: &str, days: u8) -> Result<Value> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        self.get(config, "forecast.json", location, &[("days", days.to_string())])
            .await
    }
}
