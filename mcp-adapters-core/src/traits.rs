use async_trait::async_trait;
use serde_json::Value;

use crate::error::CoreResult;
use crate::registry::ToolRegistry;
use crate::types::ToolOutput;

/// A facade exposing a fixed set of tools over one upstream.
///
/// `invoke` is only called with names present in `registry()`; implementations still
/// answer any other name with [`CoreError::UnknownTool`](crate::CoreError::UnknownTool).
#[async_trait]
pub trait ToolSet: Send + Sync {
    fn registry(&self) -> &ToolRegistry;

    /// Run one tool with its raw argument map (`null` when none were sent).
    async fn invoke(&self, name: &str, arguments: Value) -> CoreResult<ToolOutput>;
}
