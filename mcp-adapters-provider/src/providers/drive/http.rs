//! Google Drive HTTP request methods

use async_trait::async_trait;
use reqwest::RequestBuilder;

use crate::auth::OAuthCredential;
use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{
    ErrorContext, FileDeleter, FileDownloader, FileLister, FileUploader, ProviderErrorMapper,
    RawApiError,
};
use crate::types::{DriveFile, FileQuery, FileUpload, UploadedFile};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{DriveClient, FileListResponse, GoogleErrorResponse, LIST_FIELDS};

impl DriveClient {
    fn authorized(&self, builder: RequestBuilder, credential: &OAuthCredential) -> RequestBuilder {
        builder.bearer_auth(&credential.token)
    }

    /// Turn a non-2xx response body into a [`ProviderError`].
    pub(crate) fn api_error(&self, status: u16, body: &str, resource: Option<&str>) -> ProviderError {
        let raw = match serde_json::from_str::<GoogleErrorResponse>(body) {
            Ok(envelope) => {
                let error = envelope.error;
                log::warn!(
                    "[{}] API error (HTTP {}): {}",
                    self.provider_name(),
                    error.code.unwrap_or(status),
                    error.message
                );
                match error.reason() {
                    Some(reason) => RawApiError::with_code(reason, error.message.clone()),
                    None => RawApiError::new(error.message.clone()),
                }
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
        let context = match resource {
            Some(id) => ErrorContext::for_resource(id, status),
            None => ErrorContext::for_status(status),
        };
        self.map_error(raw, context)
    }

    /// Build a `multipart/related` body: JSON metadata part, then the media part.
    pub(crate) fn multipart_body(upload: &FileUpload, boundary: &str) -> Vec<u8> {
        let metadata = serde_json::json!({ "name": upload.name }).to_string();
        let mut body = Vec::with_capacity(upload.content.len() + metadata.len() + 256);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Type: {}\r\n\r\n", upload.mime_type).as_bytes(),
        );
        body.extend_from_slice(&upload.content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        body
    }
}

#[async_trait]
impl FileLister for DriveClient {
    async fn list_files(
        &self,
        credential: &OAuthCredential,
        query: &FileQuery,
    ) -> Result<Vec<DriveFile>> {
        let url = self.files_url();
        let page_size = query.page_size.to_string();
        let mut params = vec![("pageSize", page_size.as_str()), ("fields", LIST_FIELDS)];
        if let Some(q) = query.query.as_deref() {
            params.push(("q", q));
        }

        let request = self.authorized(self.client.get(&url).query(&params), credential);
        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), "GET", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.api_error(status, &body, None));
        }

        let response: FileListResponse = HttpUtils::parse_json(&body, self.provider_name())?;
        if response.next_page_token.is_some() {
            log::debug!(
                "[{}] More results available; returning first page only",
                self.provider_name()
            );
        }

        let mut files = response.files;
        files.truncate(query.page_size as usize);
        Ok(files)
    }
}

#[async_trait]
impl FileUploader for DriveClient {
    async fn upload_file(
        &self,
        credential: &OAuthCredential,
        upload: &FileUpload,
    ) -> Result<UploadedFile> {
        let url = self.upload_url();
        let boundary = format!("mcp_adapters_{}", uuid::Uuid::new_v4().simple());
        let body = Self::multipart_body(upload, &boundary);
        log::debug!(
            "[{}] Uploading '{}' ({} bytes, {})",
            self.provider_name(),
            upload.name,
            upload.content.len(),
            upload.mime_type
        );

        let request = self.authorized(
            self.client
                .post(&url)
                .query(&[("uploadType", "multipart"), ("fields", "id")])
                .header(
                    reqwest::header::CONTENT_TYPE,
                    format!("multipart/related; boundary={boundary}"),
                )
                .body(body),
            credential,
        );
        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.api_error(status, &body, None));
        }

        HttpUtils::parse_json(&body, self.provider_name())
    }
}

#[async_trait]
impl FileDownloader for DriveClient {
    async fn download_file(&self, credential: &OAuthCredential, file_id: &str) -> Result<Vec<u8>> {
        let url = self.file_url(file_id);
        let request = self.authorized(self.client.get(&url).query(&[("alt", "media")]), credential);

        let response = HttpUtils::send(request, self.provider_name(), "GET", &url).await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = HttpUtils::read_text(response, self.provider_name()).await?;
            return Err(self.api_error(status, &body, Some(file_id)));
        }

        HttpUtils::read_chunks(response, self.provider_name()).await
    }
}

#[async_trait]
impl FileDeleter for DriveClient {
    async fn delete_file(&self, credential: &OAuthCredential, file_id: &str) -> Result<()> {
        let url = self.file_url(file_id);
        let request = self.authorized(self.client.delete(&url), credential);

        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), "DELETE", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.api_error(status, &body, Some(file_id)));
        }
        Ok(())
    }
}
