//! Adapter configuration: locations of on-disk resources, HTTP timeouts, and the
//! JSON documents read from the config directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::redact_secret;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "MCP_ADAPTERS_CONFIG_DIR";
/// Environment variable overriding the Drive HTTP timeout (whole seconds).
pub const HTTP_TIMEOUT_ENV: &str = "MCP_ADAPTERS_HTTP_TIMEOUT_SECS";

const DEFAULT_CONFIG_DIR: &str = "config";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const TOKEN_FILE: &str = "token.json";
const CLIENT_SECRETS_FILE: &str = "gdrive_credentials.json";
const WEATHER_CONFIG_FILE: &str = "weather_config.json";

const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weatherapi.com/v1";
const DEFAULT_WEATHER_TIMEOUT_SECS: f64 = 10.0;

/// Process-wide adapter settings, built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Directory holding the token, client secrets and weather config files.
    pub config_dir: PathBuf,
    /// Per-request timeout for Drive and OAuth calls.
    pub http_timeout: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}

impl AdapterConfig {
    /// Settings rooted at `config_dir` with the default HTTP timeout.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Read settings from the environment, falling back to defaults.
    ///
    /// Never fails: an unparsable timeout is logged and ignored.
    pub fn from_env() -> Self {
        let config_dir = std::env::var_os(CONFIG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR), PathBuf::from);

        let http_timeout = match std::env::var(HTTP_TIMEOUT_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "Ignoring {HTTP_TIMEOUT_ENV}={raw:?}, using {DEFAULT_HTTP_TIMEOUT_SECS}s"
                    );
                    Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Self {
            config_dir,
            http_timeout,
        }
    }

    /// Persisted OAuth token (`token.json`).
    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join(TOKEN_FILE)
    }

    /// OAuth client secrets downloaded from the Google console (`gdrive_credentials.json`).
    pub fn client_secrets_path(&self) -> PathBuf {
        self.config_dir.join(CLIENT_SECRETS_FILE)
    }

    /// WeatherAPI settings (`weather_config.json`).
    pub fn weather_config_path(&self) -> PathBuf {
        self.config_dir.join(WEATHER_CONFIG_FILE)
    }
}

/// WeatherAPI settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; fractional values are allowed.
    #[serde(default = "default_weather_timeout")]
    pub timeout: f64,
}

fn default_weather_base_url() -> String {
    DEFAULT_WEATHER_BASE_URL.to_string()
}

const fn default_weather_timeout() -> f64 {
    DEFAULT_WEATHER_TIMEOUT_SECS
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &redact_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl WeatherConfig {
    /// Read and validate the config file at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let config: Self = read_json(path).await?;
        config.validate(path)?;
        Ok(config)
    }

    /// Reject configs that cannot produce a working request.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(config_error(path, "api_key must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(config_error(path, "base_url must not be empty"));
        }
        if !(self.timeout > 0.0 && Duration::try_from_secs_f64(self.timeout).is_ok()) {
            return Err(config_error(
                path,
                format!("timeout must be a positive number of seconds, got {}", self.timeout),
            ));
        }
        Ok(())
    }

    /// The configured timeout as a [`Duration`].
    ///
    /// A value that was never validated and does not fit a `Duration` falls back to the
    /// default timeout.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_WEATHER_TIMEOUT_SECS))
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// One section of an OAuth client-secrets file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecretEntry {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

pub(crate) fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl std::fmt::Debug for ClientSecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretEntry")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact_secret(&self.client_secret))
            .field("auth_uri", &self.auth_uri)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// OAuth client secrets as downloaded from the Google Cloud console.
///
/// Desktop clients carry an `installed` section, web clients a `web` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecrets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<ClientSecretEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<ClientSecretEntry>,
}

impl ClientSecrets {
    pub async fn load(path: &Path) -> Result<Self> {
        let secrets: Self = read_json(path).await?;
        if secrets.entry().is_none() {
            return Err(config_error(
                path,
                "expected an \"installed\" or \"web\" client section",
            ));
        }
        Ok(secrets)
    }

    /// The usable section, preferring `installed`.
    pub fn entry(&self) -> Option<&ClientSecretEntry> {
        self.installed.as_ref().or(self.web.as_ref())
    }
}

pub(crate) fn config_error(path: &Path, detail: impl Into<String>) -> ProviderError {
    ProviderError::ConfigError {
        path: path.display().to_string(),
        detail: detail.into(),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            config_error(path, "file not found")
        } else {
            config_error(path, e.to_string())
        }
    })?;
    serde_json::from_str(&raw).map_err(|e| config_error(path, e.to_string()))
}
