//! Routes a tool call to its facade and turns every outcome into a [`ToolResult`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use crate::error::CoreError;
use crate::registry::ToolRegistry;
use crate::traits::ToolSet;
use crate::types::ToolResult;

/// Error boundary between the transport and the facades.
///
/// Nothing escapes `dispatch`: unknown names, facade errors and facade panics all come
/// back as [`ToolResult::Failure`].
#[derive(Clone)]
pub struct Dispatcher {
    tools: Arc<dyn ToolSet>,
}

impl Dispatcher {
    pub fn new(tools: Arc<dyn ToolSet>) -> Self {
        Self { tools }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.tools.registry()
    }

    pub async fn dispatch(&self, name: &str, arguments: Value) -> ToolResult {
        if !self.registry().contains(name) {
            let err = CoreError::UnknownTool(name.to_string());
            log::warn!("{err}");
            return err.into();
        }

        log::debug!("Invoking tool '{name}'");
        let outcome = AssertUnwindSafe(self.tools.invoke(name, arguments))
            .catch_unwind()
            .await;

        let rendered = match outcome {
            Ok(result) => result.and_then(crate::types::ToolOutput::render),
            Err(panic) => Err(CoreError::Internal(format!(
                "tool '{name}' panicked: {}",
                panic_message(panic.as_ref())
            ))),
        };

        match rendered {
            Ok(text) => ToolResult::Success(text),
            Err(err) => {
                if err.is_expected() {
                    log::warn!("Tool '{name}' failed: {err}");
                } else {
                    log::error!("Tool '{name}' failed: {err}");
                }
                err.into()
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
