//! MCP tool parameter schemas
//!
//! Input parameter structures for the Drive tools. All structs derive `Debug`,
//! `Deserialize`, and `JsonSchema`; the registry builds each tool's input schema from them.

use schemars::JsonSchema;
use serde::Deserialize;

/// Default page size for `list_files`.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

const fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

/// Parameters for `list_files` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListFilesParams {
    /// Drive search expression.
    #[schemars(description = "Search query (optional)")]
    #[serde(default)]
    pub query: Option<String>,

    /// Upper bound on returned records.
    #[schemars(description = "Maximum number of files to return")]
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Parameters for `upload_file` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadFileParams {
    #[schemars(description = "Local path to file to upload")]
    pub file_path: String,

    /// Defaults to the file's base name.
    #[schemars(description = "Name for the file in Drive (optional)")]
    #[serde(default)]
    pub name: Option<String>,
}

/// Parameters for `download_file` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DownloadFileParams {
    #[schemars(description = "Google Drive file ID")]
    pub file_id: String,

    #[schemars(description = "Local path to save the file")]
    pub output_path: String,
}

/// Parameters for `delete_file` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteFileParams {
    #[schemars(description = "Google Drive file ID")]
    pub file_id: String,
}
