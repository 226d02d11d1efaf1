//! Drive tool set: one facade function per tool, each a single upstream call.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use mcp_adapters_core::{
    CoreError, CoreResult, ToolDescriptor, ToolOutput, ToolRegistry, ToolSet, parse_arguments,
};
use mcp_adapters_provider::{
    CredentialProvider, DriveClient, FileDeleter, FileDownloader, FileLister, FileQuery,
    FileUpload, FileUploader, OAuthCredential, guess_mime_type,
};
use serde::Serialize;
use serde_json::Value;

use crate::schemas::{DeleteFileParams, DownloadFileParams, ListFilesParams, UploadFileParams};

pub const LIST_FILES: &str = "list_files";
pub const UPLOAD_FILE: &str = "upload_file";
pub const DOWNLOAD_FILE: &str = "download_file";
pub const DELETE_FILE: &str = "delete_file";

type OAuthProvider = dyn CredentialProvider<Credential = OAuthCredential>;

/// Body returned by `upload_file`.
#[derive(Debug, Serialize)]
struct UploadReceipt {
    file_id: String,
    message: &'static str,
}

/// The Drive adapter's tools.
pub struct DriveTools {
    registry: ToolRegistry,
    credentials: Arc<OAuthProvider>,
    lister: Arc<dyn FileLister>,
    uploader: Arc<dyn FileUploader>,
    downloader: Arc<dyn FileDownloader>,
    deleter: Arc<dyn FileDeleter>,
}

impl DriveTools {
    pub fn new(
        credentials: Arc<OAuthProvider>,
        lister: Arc<dyn FileLister>,
        uploader: Arc<dyn FileUploader>,
        downloader: Arc<dyn FileDownloader>,
        deleter: Arc<dyn FileDeleter>,
    ) -> Self {
        Self {
            registry: registry(),
            credentials,
            lister,
            uploader,
            downloader,
            deleter,
        }
    }

    /// All four capabilities backed by one Drive client.
    pub fn from_client(credentials: Arc<OAuthProvider>, drive: DriveClient) -> Self {
        let drive = Arc::new(drive);
        Self::new(
            credentials,
            drive.clone(),
            drive.clone(),
            drive.clone(),
            drive,
        )
    }

    async fn credential(&self) -> CoreResult<OAuthCredential> {
        self.credentials
            .ensure_credential()
            .await
            .map_err(CoreError::Credential)
    }

    async fn list_files(&self, params: ListFilesParams) -> CoreResult<ToolOutput> {
        let credential = self.credential().await?;
        // pageSize is clamped to 1..=1000; the reply is cut to the requested count.
        let limit = usize::try_from(params.max_results).unwrap_or(usize::MAX);
        let query = FileQuery::new(params.query, params.max_results);

        let mut files = self
            .lister
            .list_files(&credential, &query)
            .await
            .map_err(CoreError::upstream("List files"))?;
        files.truncate(limit);

        log::debug!("list_files returned {} file(s)", files.len());
        ToolOutput::json(&files)
    }

    async fn upload_file(&self, params: UploadFileParams) -> CoreResult<ToolOutput> {
        let credential = self.credential().await?;

        let content = tokio::fs::read(&params.file_path)
            .await
            .map_err(CoreError::io("Upload", params.file_path.as_str()))?;
        let name = params
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| basename(&params.file_path));
        let upload = FileUpload {
            mime_type: guess_mime_type(&params.file_path).to_string(),
            name,
            content,
        };

        let uploaded = self
            .uploader
            .upload_file(&credential, &upload)
            .await
            .map_err(CoreError::upstream("Upload"))?;

        log::info!("Uploaded '{}' as {}", upload.name, uploaded.id);
        ToolOutput::json(&UploadReceipt {
            file_id: uploaded.id,
            message: "File uploaded successfully",
        })
    }

    async fn download_file(&self, params: DownloadFileParams) -> CoreResult<ToolOutput> {
        let credential = self.credential().await?;

        let content = self
            .downloader
            .download_file(&credential, &params.file_id)
            .await
            .map_err(CoreError::upstream("Download"))?;

        let output = Path::new(&params.output_path);
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(CoreError::io("Download", parent.display().to_string()))?;
        }
        tokio::fs::write(output, &content)
            .await
            .map_err(CoreError::io("Download", params.output_path.as_str()))?;

        log::info!(
            "Downloaded {} ({} bytes) to {}",
            params.file_id,
            content.len(),
            params.output_path
        );
        Ok(ToolOutput::text(format!(
            "File downloaded to {}",
            params.output_path
        )))
    }

    async fn delete_file(&self, params: DeleteFileParams) -> CoreResult<ToolOutput> {
        let credential = self.credential().await?;

        self.deleter
            .delete_file(&credential, &params.file_id)
            .await
            .map_err(CoreError::upstream("Delete"))?;

        log::info!("Deleted {}", params.file_id);
        Ok(ToolOutput::text(format!(
            "File {} deleted successfully",
            params.file_id
        )))
    }
}

#[async_trait]
impl ToolSet for DriveTools {
    fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    async fn invoke(&self, name: &str, arguments: Value) -> CoreResult<ToolOutput> {
        match name {
            LIST_FILES => self.list_files(parse_arguments(name, arguments)?).await,
            UPLOAD_FILE => self.upload_file(parse_arguments(name, arguments)?).await,
            DOWNLOAD_FILE => self.download_file(parse_arguments(name, arguments)?).await,
            DELETE_FILE => self.delete_file(parse_arguments(name, arguments)?).await,
            other => Err(CoreError::UnknownTool(other.to_string())),
        }
    }
}

fn registry() -> ToolRegistry {
    ToolRegistry::new()
        .with(ToolDescriptor::for_params::<ListFilesParams>(
            LIST_FILES,
            "List files in Google Drive",
        ))
        .with(ToolDescriptor::for_params::<UploadFileParams>(
            UPLOAD_FILE,
            "Upload a file to Google Drive",
        ))
        .with(ToolDescriptor::for_params::<DownloadFileParams>(
            DOWNLOAD_FILE,
            "Download a file from Google Drive",
        ))
        .with(ToolDescriptor::for_params::<DeleteFileParams>(
            DELETE_FILE,
            "Delete a file from Google Drive",
        ))
}

/// Final path component, or the whole path when it has none.
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "tools_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
