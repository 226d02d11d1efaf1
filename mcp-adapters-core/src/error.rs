//! Unified error type definition

use thiserror::Error;

pub use mcp_adapters_provider::ProviderError;

/// Core layer error type
///
/// Every variant ends up as the text of a failed tool call, so `Display` is written
/// for the person reading the tool output.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments missing or of the wrong shape
    #[error("Invalid arguments for {tool}: {detail}")]
    InvalidArguments { tool: String, detail: String },

    /// Upstream call failed
    #[error("{operation} failed: {source}")]
    Upstream {
        operation: &'static str,
        #[source]
        source: ProviderError,
    },

    /// Local file access failed
    #[error("{operation} failed: {path}: {source}")]
    Io {
        operation: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No usable credential could be obtained
    #[error("{0}")]
    Credential(#[source] ProviderError),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The handler itself broke (panic, invariant violation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used
    /// for log classification.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnknownTool(_) | Self::InvalidArguments { .. } => true,
            Self::Upstream { source, .. } | Self::Credential(source) => source.is_expected(),
            Self::Io { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::SerializationError(_) | Self::Internal(_) => false,
        }
    }

    pub fn upstream(operation: &'static str) -> impl FnOnce(ProviderError) -> Self {
        move |source| Self::Upstream { operation, source }
    }

    pub fn io(operation: &'static str, path: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
