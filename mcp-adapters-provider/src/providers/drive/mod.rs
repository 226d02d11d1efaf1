//! Google Drive REST v3 client

mod error;
mod http;
mod types;

use reqwest::Client;

pub(crate) use types::{FileListResponse, GoogleErrorResponse};

/// Base URL of the Drive metadata API.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com";
/// Base URL of the Drive media upload API.
pub const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com";

/// Field selector for `files.list`.
pub(crate) const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, modifiedTime, size)";

/// Google Drive client implementing the file capability traits.
#[derive(Debug, Clone)]
pub struct DriveClient {
    pub(crate) client: Client,
    pub(crate) api_base: String,
    pub(crate) upload_base: String,
}

impl DriveClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_urls(client, DRIVE_API_BASE, DRIVE_UPLOAD_BASE)
    }

    /// Client against non-default endpoints (mock servers, proxies).
    pub fn with_base_urls(
        client: Client,
        api_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            upload_base: upload_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn files_url(&self) -> String {
        format!("{}/drive/v3/files", self.api_base)
    }

    pub(crate) fn file_url(&self, file_id: &str) -> String {
        format!(
            "{}/drive/v3/files/{}",
            self.api_base,
            urlencoding::encode(file_id)
        )
    }

    pub(crate) fn upload_url(&self) -> String {
        format!("{}/upload/drive/v3/files", self.upload_base)
    }
}
