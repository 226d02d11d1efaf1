use serde::Deserialize;

use crate::types::DriveFile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Google API error envelope:
/// `{"error": {"code": 404, "message": "...", "errors": [{"reason": "notFound"}], "status": "NOT_FOUND"}}`
#[derive(Debug, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GoogleErrorItem>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorItem {
    #[serde(default)]
    pub reason: Option<String>,
}

impl GoogleErrorBody {
    /// The most specific machine-readable code available: the first `reason`,
    /// then the canonical `status`.
    pub fn reason(&self) -> Option<&str> {
        self.errors
            .iter()
            .find_map(|e| e.reason.as_deref())
            .or(self.status.as_deref())
    }
}
