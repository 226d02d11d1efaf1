//! In-memory Drive and credential doubles for the tool tests.

use super::*;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use mcp_adapters_core::Dispatcher;
use mcp_adapters_provider::{DriveFile, ProviderError, UploadedFile};
use tokio::sync::Mutex;

pub fn credential() -> OAuthCredential {
    OAuthCredential {
        token: "ya29.fake".to_string(),
        refresh_token: Some("1//refresh".to_string()),
        token_uri: "https://oauth2.googleapis.com/token".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        scopes: vec!["https://www.googleapis.com/auth/drive.file".to_string()],
        expiry: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
    }
}

/// Hands out a fixed credential, or always fails when built with [`Self::failing`].
pub struct StaticCredentials {
    fail: bool,
    calls: AtomicUsize,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    type Credential = OAuthCredential;

    async fn ensure_credential(&self) -> mcp_adapters_provider::Result<OAuthCredential> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::ConfigError {
                path: "/nonexistent/credentials.json".to_string(),
                detail: "file not found".to_string(),
            });
        }
        Ok(credential())
    }
}

#[derive(Debug, Clone)]
struct StoredFile {
    name: String,
    mime_type: String,
    content: Vec<u8>,
}

/// A Drive that lives in memory. Ids are assigned sequentially.
pub struct FakeDrive {
    files: Mutex<BTreeMap<String, StoredFile>>,
    next_id: AtomicUsize,
    queries: Mutex<Vec<FileQuery>>,
}

impl FakeDrive {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            next_id: AtomicUsize::new(1),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Pre-populate with `count` text files named `file-<n>.txt`.
    pub async fn with_files(self, count: usize) -> Self {
        for n in 0..count {
            self.insert(format!("file-{n}.txt"), "text/plain", b"x".to_vec())
                .await;
        }
        self
    }

    pub async fn insert(&self, name: String, mime_type: &str, content: Vec<u8>) -> String {
        let id = format!("fake-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.files.lock().await.insert(
            id.clone(),
            StoredFile {
                name,
                mime_type: mime_type.to_string(),
                content,
            },
        );
        id
    }

    pub async fn mime_type_of(&self, id: &str) -> Option<String> {
        self.files.lock().await.get(id).map(|f| f.mime_type.clone())
    }

    pub async fn name_of(&self, id: &str) -> Option<String> {
        self.files.lock().await.get(id).map(|f| f.name.clone())
    }

    pub async fn queries(&self) -> Vec<FileQuery> {
        self.queries.lock().await.clone()
    }

    fn not_found(id: &str) -> ProviderError {
        ProviderError::NotFound {
            provider: "google_drive".to_string(),
            resource: id.to_string(),
            raw_message: Some(format!("File not found: {id}.")),
        }
    }
}

#[async_trait]
impl FileLister for FakeDrive {
    async fn list_files(
        &self,
        _credential: &OAuthCredential,
        query: &FileQuery,
    ) -> mcp_adapters_provider::Result<Vec<DriveFile>> {
        self.queries.lock().await.push(query.clone());
        let files = self.files.lock().await;
        Ok(files
            .iter()
            .filter(|(_, f)| {
                query
                    .query
                    .as_deref()
                    .is_none_or(|q| f.name.contains(q))
            })
            .take(query.page_size as usize)
            .map(|(id, f)| DriveFile {
                id: id.clone(),
                name: f.name.clone(),
                mime_type: Some(f.mime_type.clone()),
                modified_time: None,
                size: Some(f.content.len().to_string()),
            })
            .collect())
    }
}

#[async_trait]
impl FileUploader for FakeDrive {
    async fn upload_file(
        &self,
        _credential: &OAuthCredential,
        upload: &FileUpload,
    ) -> mcp_adapters_provider::Result<UploadedFile> {
        let id = self
            .insert(
                upload.name.clone(),
                &upload.mime_type,
                upload.content.clone(),
            )
            .await;
        Ok(UploadedFile { id })
    }
}

#[async_trait]
impl FileDownloader for FakeDrive {
    async fn download_file(
        &self,
        _credential: &OAuthCredential,
        file_id: &str,
    ) -> mcp_adapters_provider::Result<Vec<u8>> {
        self.files
            .lock()
            .await
            .get(file_id)
            .map(|f| f.content.clone())
            .ok_or_else(|| Self::not_found(file_id))
    }
}

#[async_trait]
impl FileDeleter for FakeDrive {
    async fn delete_file(
        &self,
        _credential: &OAuthCredential,
        file_id: &str,
    ) -> mcp_adapters_provider::Result<()> {
        self.files
            .lock()
            .await
            .remove(file_id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(file_id))
    }
}

/// Tools backed entirely by `drive` and `credentials`.
pub fn drive_tools(drive: Arc<FakeDrive>, credentials: Arc<StaticCredentials>) -> DriveTools {
    DriveTools::new(
        credentials,
        drive.clone(),
        drive.clone(),
        drive.clone(),
        drive,
    )
}

pub fn dispatcher(drive: Arc<FakeDrive>) -> Dispatcher {
    Dispatcher::new(Arc::new(drive_tools(
        drive,
        Arc::new(StaticCredentials::new()),
    )))
}
