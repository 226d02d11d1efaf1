//! Scripted tool set for dispatcher and server tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult, ProviderError};
use crate::registry::ToolRegistry;
use crate::traits::ToolSet;
use crate::types::{ToolDescriptor, ToolOutput, parse_arguments};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// Text to send back
    pub message: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Tools: `echo` (text), `lookup` (JSON), `broken` (upstream error), `explode` (panic),
/// `slow` (sleeps, tracking how many calls overlap).
pub struct ScriptedTools {
    registry: ToolRegistry,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTools {
    pub fn new() -> Self {
        let registry = ToolRegistry::new()
            .with(ToolDescriptor::for_params::<EchoParams>("echo", "Echo a message"))
            .with(ToolDescriptor::for_params::<NoParams>("lookup", "Return a JSON document"))
            .with(ToolDescriptor::for_params::<NoParams>("broken", "Always fails"))
            .with(ToolDescriptor::for_params::<NoParams>("explode", "Always panics"))
            .with(ToolDescriptor::for_params::<NoParams>("slow", "Takes a while"));
        Self {
            registry,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolSet for ScriptedTools {
    fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    async fn invoke(&self, name: &str, arguments: Value) -> CoreResult<ToolOutput> {
        self.calls.lock().await.push(name.to_string());
        match name {
            "echo" => {
                let params: EchoParams = parse_arguments(name, arguments)?;
                Ok(ToolOutput::text(params.message))
            }
            "lookup" => Ok(ToolOutput::Json(json!({"answer": 42}))),
            "broken" => Err(CoreError::upstream("Lookup")(ProviderError::NotFound {
                provider: "mock".to_string(),
                resource: "thing".to_string(),
                raw_message: None,
            })),
            "explode" => panic!("kaboom"),
            "slow" => {
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(ToolOutput::text("done"))
            }
            other => Err(CoreError::UnknownTool(other.to_string())),
        }
    }
}
