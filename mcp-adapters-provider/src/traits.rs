use async_trait::async_trait;

use crate::auth::OAuthCredential;
use crate::config::WeatherConfig;
use crate::error::{ProviderError, Result};
use crate::types::{DriveFile, FileQuery, FileUpload, UploadedFile};

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (numeric for WeatherAPI, reason string for Google)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra information used while mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Identifier of the resource the request targeted (file id, location)
    pub resource: Option<String>,
    /// HTTP status of the failed response
    pub status: Option<u16>,
}

impl ErrorContext {
    pub fn for_resource(resource: impl Into<String>, status: u16) -> Self {
        Self {
            resource: Some(resource.into()),
            status: Some(status),
        }
    }

    pub fn for_status(status: u16) -> Self {
        Self {
            resource: None,
            status: Some(status),
        }
    }

    pub fn resource_or_unknown(&self) -> String {
        self.resource
            .clone()
            .unwrap_or_else(|| "<unknown>".to_string())
    }
}

/// Maps raw upstream errors to [`ProviderError`] (internal).
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in error messages.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Source of the credential an upstream call needs.
///
/// Implementations:
/// - [`OAuthCredentialProvider`](crate::OAuthCredentialProvider): cached / refreshed /
///   interactively obtained OAuth2 token, persisted to a token file.
/// - [`StaticKeyProvider`](crate::StaticKeyProvider): API key read from a config file.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// The credential material handed to the upstream client.
    type Credential: Send + Sync;

    /// Return a credential that is valid right now.
    ///
    /// May touch the disk (load/persist) and, for OAuth, may run the interactive
    /// consent flow when nothing cached can be used.
    async fn ensure_credential(&self) -> Result<Self::Credential>;
}

/// Lists files in the user's Drive (first page only).
#[async_trait]
pub trait FileLister: Send + Sync {
    async fn list_files(
        &self,
        credential: &OAuthCredential,
        query: &FileQuery,
    ) -> Result<Vec<DriveFile>>;
}

/// Uploads a file's bytes together with its metadata.
#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload_file(
        &self,
        credential: &OAuthCredential,
        upload: &FileUpload,
    ) -> Result<UploadedFile>;
}

/// Downloads a file's media content completely into memory.
#[async_trait]
pub trait FileDownloader: Send + Sync {
    async fn download_file(&self, credential: &OAuthCredential, file_id: &str) -> Result<Vec<u8>>;
}

/// Deletes a file by id.
#[async_trait]
pub trait FileDeleter: Send + Sync {
    async fn delete_file(&self, credential: &OAuthCredential, file_id: &str) -> Result<()>;
}

/// Current conditions and forecasts for a location.
///
/// Payloads are returned verbatim as parsed JSON.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(
        &self,
        config: &WeatherConfig,
        location: &str,
    ) -> Result<serde_json::Value>;

    async fn forecast(
        &self,
        config: &WeatherConfig,
        location: &str,
        days: u8,
    ) -> Result<serde_json::Value>;
}
