//! # mcp-adapters-core
//!
//! The pieces every adapter shares: the tool data model, the [`ToolSet`] facade trait,
//! the error-containing [`Dispatcher`], and [`AdapterServer`], the rmcp transport
//! shell that serves `tools/list` and `tools/call`.
//!
//! An adapter supplies a [`ToolSet`] (its registry plus one `invoke` per tool) and a
//! [`ServerIdentity`]; everything between the wire and the facade lives here.

mod dispatcher;
mod error;
mod registry;
mod server;
mod traits;
mod types;

pub use dispatcher::Dispatcher;
pub use error::{CoreError, CoreResult, ProviderError};
pub use registry::ToolRegistry;
pub use server::{AdapterServer, ServerIdentity};
pub use traits::ToolSet;
pub use types::{ToolDescriptor, ToolOutput, ToolResult, parse_arguments};

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;
