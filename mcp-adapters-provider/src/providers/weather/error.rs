//! WeatherAPI error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::WeatherClient;

/// WeatherAPI error code mapping
/// Reference: <https://www.weatherapi.com/docs/#intro-error-codes>
impl ProviderErrorMapper for WeatherClient {
    fn provider_name(&self) -> &'static str {
        "weatherapi"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // 1002: API key not provided
            // 2006: API key provided is invalid
            Some("1002" | "2006") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 2007: API key has exceeded calls per month quota
            Some("2007") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 2008: API key has been disabled
            // 2009: API key does not have access to the resource
            Some("2008" | "2009") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 1006: No location found matching parameter 'q'
            Some("1006") => ProviderError::NotFound {
                provider: self.provider_name().to_string(),
                resource: context.resource_or_unknown(),
                raw_message: Some(raw.message),
            },

            // 1003: Parameter 'q' not provided
            // 9000: Json body passed in bulk request is invalid
            // 9001: Json body contains too many locations for bulk request
            Some(code @ ("1003" | "1005" | "9000" | "9001")) => {
                let param = match code {
                    // 1005: API request url is invalid
                    "1005" => "url",
                    _ => "q",
                };
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: param.to_string(),
                    detail: raw.message,
                }
            }

            _ => match context.status {
                Some(401) => ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                },
                Some(403) => ProviderError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                },
                // 9999: Internal application error, and anything unmapped
                _ => self.unknown_error(raw),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: &str, status: u16) -> ProviderError {
        WeatherClient::new(reqwest::Client::new()).map_error(
            RawApiError::with_code(code, "msg"),
            ErrorContext::for_resource("Atlantis", status),
        )
    }

    #[test]
    fn maps_documented_codes() {
        assert!(matches!(map("2006", 401), ProviderError::InvalidCredentials { .. }));
        assert!(matches!(map("1002", 401), ProviderError::InvalidCredentials { .. }));
        assert!(matches!(map("2007", 403), ProviderError::QuotaExceeded { .. }));
        assert!(matches!(map("2008", 403), ProviderError::PermissionDenied { .. }));
        assert!(
            matches!(map("1006", 400), ProviderError::NotFound { resource, .. } if resource == "Atlantis")
        );
        assert!(
            matches!(map("1003", 400), ProviderError::InvalidParameter { param, .. } if param == "q")
        );
        assert!(
            matches!(map("1005", 400), ProviderError::InvalidParameter { param, .. } if param == "url")
        );
    }

    #[test]
    fn internal_error_is_unknown() {
        let err = map("9999", 400);
        assert!(
            matches!(&err, ProviderError::Unknown { raw_code: Some(c), .. } if c == "9999"),
            "{err:?}"
        );
    }

    #[test]
    fn unmapped_code_falls_back_to_status() {
        assert!(matches!(map("4242", 401), ProviderError::InvalidCredentials { .. }));
        assert!(matches!(map("4242", 403), ProviderError::PermissionDenied { .. }));
    }
}
