use serde::{Deserialize, Serialize};

/// Unified error type for all upstream operations.
///
/// Each variant carries a `provider` field identifying which upstream produced the error
/// (`google-drive`, `google-oauth`, `weatherapi`), plus variant-specific context.
/// All variants are serializable for structured error reporting.
///
/// None of these errors are retried: every upstream call is a single attempt and the
/// first failure is surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The credential (OAuth token or API key) was rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The requested resource (file, location) does not exist.
    NotFound {
        /// Provider that produced the error.
        provider: String,
        /// Identifier of the missing resource.
        resource: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected by the upstream API.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account's quota has been exhausted.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A local configuration resource is missing or malformed.
    ConfigError {
        /// Path of the offending resource.
        path: String,
        /// Details about the failure.
        detail: String,
    },

    /// Reading or writing a local file failed.
    IoError {
        /// Provider on whose behalf the file was accessed.
        provider: String,
        /// Path of the file.
        path: String,
        /// Error details.
        detail: String,
    },

    /// The interactive authorization flow did not complete.
    AuthorizationFailed {
        /// Provider that produced the error.
        provider: String,
        /// Details about the failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is expected behavior (user input, missing resource, etc.),
    /// used for log grading.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::ConfigError { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::NotFound {
                provider,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] '{resource}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] '{resource}' not found")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::ConfigError { path, detail } => {
                write!(f, "Configuration error in {path}: {detail}")
            }
            Self::IoError {
                provider,
                path,
                detail,
            } => {
                write!(f, "[{provider}] I/O error on {path}: {detail}")
            }
            Self::AuthorizationFailed { provider, detail } => {
                write!(f, "[{provider}] Authorization failed: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_and_without_message() {
        let with = ProviderError::InvalidCredentials {
            provider: "google-drive".to_string(),
            raw_message: Some("Invalid Credentials".to_string()),
        };
        let without = ProviderError::InvalidCredentials {
            provider: "google-drive".to_string(),
            raw_message: None,
        };
        assert_eq!(
            with.to_string(),
            "[google-drive] Invalid credentials: Invalid Credentials"
        );
        assert_eq!(without.to_string(), "[google-drive] Invalid credentials");
    }

    #[test]
    fn display_not_found() {
        let e = ProviderError::NotFound {
            provider: "google-drive".to_string(),
            resource: "abc".to_string(),
            raw_message: Some("File not found: abc.".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[google-drive] 'abc' not found: File not found: abc."
        );
    }

    #[test]
    fn display_config_error_has_no_provider_prefix() {
        let e = ProviderError::ConfigError {
            path: "config/weather_config.json".to_string(),
            detail: "missing field `api_key`".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Configuration error in config/weather_config.json: missing field `api_key`"
        );
    }

    #[test]
    fn display_rate_limited_with_retry_after() {
        let e = ProviderError::RateLimited {
            provider: "weatherapi".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[weatherapi] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_unknown_uses_raw_message() {
        let e = ProviderError::Unknown {
            provider: "weatherapi".to_string(),
            raw_code: Some("9999".to_string()),
            raw_message: "Internal application error.".to_string(),
        };
        assert_eq!(e.to_string(), "[weatherapi] Internal application error.");
    }

    #[test]
    fn expected_errors_are_graded() {
        assert!(
            ProviderError::NotFound {
                provider: "p".into(),
                resource: "r".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ProviderError::Timeout {
                provider: "p".into(),
                detail: "d".into(),
            }
            .is_expected()
        );
        assert!(
            !ProviderError::AuthorizationFailed {
                provider: "p".into(),
                detail: "d".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ProviderError::Timeout {
            provider: "weatherapi".to_string(),
            detail: "10s".to_string(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["provider"], "weatherapi");
    }
}
