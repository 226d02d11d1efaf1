//! # mcp-adapters-provider
//!
//! Upstream clients and credential providers behind the MCP tool adapters.
//!
//! ## Upstreams
//!
//! | Upstream | Client | Capability traits | Credential |
//! |----------|--------|-------------------|------------|
//! | [Google Drive v3](https://developers.google.com/drive/api/reference/rest/v3) | [`DriveClient`] | [`FileLister`], [`FileUploader`], [`FileDownloader`], [`FileDeleter`] | [`OAuthCredentialProvider`] |
//! | [WeatherAPI.com](https://www.weatherapi.com/docs/) | [`WeatherClient`] | [`WeatherSource`] | [`StaticKeyProvider`] |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mcp_adapters_provider::{
//!     AdapterConfig, CredentialProvider, DRIVE_FILE_SCOPE, DriveClient, FileLister, FileQuery,
//!     LocalServerFlow, OAuthClient, OAuthCredentialProvider, TokenStore, create_http_client,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdapterConfig::from_env();
//!     let http = create_http_client(config.http_timeout)?;
//!
//!     let oauth = OAuthClient::new(http.clone());
//!     let flow = LocalServerFlow::new(config.client_secrets_path(), oauth.clone(), vec![DRIVE_FILE_SCOPE]);
//!     let credentials =
//!         OAuthCredentialProvider::new(TokenStore::new(config.token_path()), oauth, Arc::new(flow));
//!
//!     let drive = DriveClient::new(http);
//!     let credential = credentials.ensure_credential().await?;
//!     for file in drive.list_files(&credential, &FileQuery::new(None, 10)).await? {
//!         println!("{} ({})", file.name, file.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All upstream operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: token or API key rejected
//! - [`ProviderError::NotFound`]: file id or location unknown upstream
//! - [`ProviderError::ConfigError`]: a local config resource is missing or malformed
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failure
//!
//! Every call is a single attempt; nothing is retried.

mod auth;
mod config;
mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export traits (the error mapper stays internal)
pub use traits::{
    CredentialProvider, FileDeleter, FileDownloader, FileLister, FileUploader, WeatherSource,
};

pub use types::{DriveFile, FileQuery, FileUpload, MAX_DRIVE_PAGE_SIZE, UploadedFile};

pub use config::{
    AdapterConfig, CONFIG_DIR_ENV, ClientSecretEntry, ClientSecrets, HTTP_TIMEOUT_ENV,
    WeatherConfig,
};

pub use auth::{
    AuthorizationFlow, DRIVE_FILE_SCOPE, LocalServerFlow, OAuthClient, OAuthCredential,
    OAuthCredentialProvider, StaticKeyProvider, TokenStore,
};

// Re-export concrete clients
pub use providers::common::{create_http_client, guess_mime_type};
pub use providers::{
    DRIVE_API_BASE, DRIVE_UPLOAD_BASE, DriveClient, MAX_FORECAST_DAYS, WeatherClient,
};

pub use utils::log_sanitizer;
