//! MCP server shell shared by the adapters.
//!
//! Serves `tools/list` straight from the registry and routes `tools/call` through the
//! [`Dispatcher`]. Tool failures are returned as ordinary results with `is_error` set;
//! no protocol error is ever produced for them.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::dispatcher::Dispatcher;
use crate::traits::ToolSet;
use crate::types::{ToolDescriptor, ToolResult};

/// Name, version and usage hint advertised in the `initialize` handshake.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub instructions: String,
}

/// MCP server for one adapter.
///
/// Tool calls are handled one at a time: each runs to completion, upstream call
/// included, before the next is dispatched.
#[derive(Clone)]
pub struct AdapterServer {
    dispatcher: Dispatcher,
    identity: ServerIdentity,
    turn: Arc<Mutex<()>>,
}

impl AdapterServer {
    pub fn new(tools: Arc<dyn ToolSet>, identity: ServerIdentity) -> Self {
        Self {
            dispatcher: Dispatcher::new(tools),
            identity,
            turn: Arc::new(Mutex::new(())),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Registry entries in rmcp's wire form.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.registry().iter().map(to_rmcp_tool).collect()
    }

    /// Dispatch one call under the turn lock and wrap the result for the wire.
    pub async fn handle_call(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> CallToolResult {
        let _turn = self.turn.lock().await;
        let arguments = arguments.map_or(Value::Null, Value::Object);
        let result = self.dispatcher.dispatch(name, arguments).await;
        to_call_tool_result(result)
    }
}

fn to_rmcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        Arc::new(descriptor.input_schema.clone()),
    )
}

fn to_call_tool_result(result: ToolResult) -> CallToolResult {
    let failed = result.is_failure();
    let content = vec![Content::text(result.into_text())];
    if failed {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl ServerHandler for AdapterServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name.clone_from(&self.identity.name);
        server_info.version.clone_from(&self.identity.version);

        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(self.identity.instructions.clone()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.handle_call(&request.name, request.arguments).await) }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;
