//! Upstream domain objects and request types.

use serde::{Deserialize, Serialize};

/// Drive's accepted `pageSize` range for `files.list`.
pub const MAX_DRIVE_PAGE_SIZE: u32 = 1000;

/// File metadata as returned by `files.list`.
///
/// Only the fields requested through the `fields` selector are present; anything Drive
/// omits stays omitted when serialized back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    /// Size in bytes, as a decimal string (Drive encodes int64 as string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Parameters for a single `files.list` page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    /// Drive search expression (`q`), e.g. `name contains 'report'`.
    pub query: Option<String>,
    /// Maximum number of records to return.
    pub page_size: u32,
}

impl FileQuery {
    /// Build a query, dropping blank search expressions and clamping the page size
    /// to `1..=MAX_DRIVE_PAGE_SIZE`.
    pub fn new(query: Option<String>, page_size: u32) -> Self {
        Self {
            query: query.filter(|q| !q.trim().is_empty()),
            page_size: page_size.clamp(1, MAX_DRIVE_PAGE_SIZE),
        }
    }
}

/// A file to upload: metadata plus its content.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Name shown in Drive.
    pub name: String,
    /// Media type of the content.
    pub mime_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("content_len", &self.content.len())
            .finish()
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_query_drops_blank_query() {
        assert_eq!(FileQuery::new(Some("   ".to_string()), 10).query, None);
        assert_eq!(
            FileQuery::new(Some("name contains 'a'".to_string()), 10).query,
            Some("name contains 'a'".to_string())
        );
    }

    #[test]
    fn file_query_clamps_page_size() {
        assert_eq!(FileQuery::new(None, 0).page_size, 1);
        assert_eq!(FileQuery::new(None, 5000).page_size, MAX_DRIVE_PAGE_SIZE);
        assert_eq!(FileQuery::new(None, 10).page_size, 10);
    }

    #[test]
    fn drive_file_round_trips_camel_case_and_omits_missing_fields() {
        let json = serde_json::json!({
            "id": "1",
            "name": "notes.txt",
            "mimeType": "text/plain",
            "size": "12"
        });
        let file: DriveFile = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(file.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(file.modified_time, None);
        assert_eq!(serde_json::to_value(&file).unwrap(), json);
    }

    #[test]
    fn upload_debug_hides_content() {
        let upload = FileUpload {
            name: "a.bin".to_string(),
            mime_type: "application/octet-stream".to_string(),
            content: vec![0; 2048],
        };
        let debug = format!("{upload:?}");
        assert!(debug.contains("content_len: 2048"));
    }
}
