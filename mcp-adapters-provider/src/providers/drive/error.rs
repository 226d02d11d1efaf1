//! Google Drive error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DriveClient;

/// Google error reasons, falling back to the HTTP status.
/// Reference: <https://developers.google.com/drive/api/guides/handle-errors>
impl ProviderErrorMapper for DriveClient {
    fn provider_name(&self) -> &'static str {
        "google-drive"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match (raw.code.as_deref(), context.status) {
            (Some("authError" | "UNAUTHENTICATED"), _) | (_, Some(401)) => {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            (Some("userRateLimitExceeded" | "rateLimitExceeded"), _) => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            (Some("storageQuotaExceeded" | "quotaExceeded" | "dailyLimitExceeded"), _) => {
                ProviderError::QuotaExceeded {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            (
                Some(
                    "insufficientPermissions"
                    | "insufficientFilePermissions"
                    | "appNotAuthorizedToFile"
                    | "forbidden"
                    | "PERMISSION_DENIED",
                ),
                _,
            )
            | (_, Some(403)) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            (Some("notFound" | "NOT_FOUND"), _) | (_, Some(404)) => ProviderError::NotFound {
                provider,
                resource: context.resource_or_unknown(),
                raw_message: Some(raw.message),
            },

            (Some("badRequest" | "invalid" | "invalidParameter" | "required" | "INVALID_ARGUMENT"), _)
            | (_, Some(400)) => ProviderError::InvalidParameter {
                provider,
                param: context.resource.unwrap_or_else(|| "request".to_string()),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DriveClient {
        DriveClient::new(reqwest::Client::new())
    }

    #[test]
    fn not_found_carries_file_id() {
        let err = client().map_error(
            RawApiError::with_code("notFound", "File not found: abc."),
            ErrorContext::for_resource("abc", 404),
        );
        assert!(
            matches!(&err, ProviderError::NotFound { resource, .. } if resource == "abc"),
            "{err:?}"
        );
    }

    #[test]
    fn status_decides_when_reason_is_unknown() {
        let err = client().map_error(
            RawApiError::with_code("somethingNew", "nope"),
            ErrorContext::for_status(401),
        );
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }), "{err:?}");

        let err = client().map_error(RawApiError::new("denied"), ErrorContext::for_status(403));
        assert!(matches!(err, ProviderError::PermissionDenied { .. }), "{err:?}");
    }

    #[test]
    fn quota_and_rate_limit_reasons() {
        let err = client().map_error(
            RawApiError::with_code("storageQuotaExceeded", "full"),
            ErrorContext::for_status(403),
        );
        assert!(matches!(err, ProviderError::QuotaExceeded { .. }), "{err:?}");

        let err = client().map_error(
            RawApiError::with_code("userRateLimitExceeded", "slow down"),
            ErrorContext::for_status(403),
        );
        assert!(matches!(err, ProviderError::RateLimited { .. }), "{err:?}");
    }

    #[test]
    fn unmapped_error_is_unknown() {
        let err = client().map_error(
            RawApiError::with_code("backendError", "Backend Error"),
            ErrorContext::for_status(500),
        );
        assert_eq!(err.to_string(), "[google-drive] Backend Error");
    }
}
