//! Tool data model: descriptors, facade outputs and the rendered result envelope.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Static description of one tool: name, human-readable purpose and JSON-schema input.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON-schema object (`type: object`, `properties`, `required`).
    pub input_schema: Map<String, Value>,
}

impl ToolDescriptor {
    /// Descriptor whose input schema is derived from the parameter struct `P`.
    pub fn for_params<P: JsonSchema>(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let schema = schemars::schema_for!(P);
        let input_schema = match serde_json::to_value(&schema) {
            Ok(Value::Object(mut map)) => {
                map.remove("$schema");
                map
            }
            other => {
                log::error!("Tool '{name}' has a non-object input schema: {other:?}");
                let mut map = Map::new();
                map.insert("type".to_string(), Value::String("object".to_string()));
                map
            }
        };
        Self {
            name,
            description: description.into(),
            input_schema,
        }
    }

    /// Names listed under `required`.
    pub fn required(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The schema of a single property, if declared.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.input_schema.get("properties")?.get(name)
    }
}

/// Successful facade output, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Passed through verbatim.
    Text(String),
    /// Pretty-printed JSON.
    Json(Value),
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn json<T: serde::Serialize>(value: &T) -> CoreResult<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    pub fn render(self) -> CoreResult<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(value) => serde_json::to_string_pretty(&value)
                .map_err(|e| CoreError::SerializationError(e.to_string())),
        }
    }
}

/// Outcome of one tool invocation as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    Success(String),
    Failure(String),
}

impl ToolResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The single text block sent back: the payload, or `Error: <message>`.
    pub fn into_text(self) -> String {
        match self {
            Self::Success(text) => text,
            Self::Failure(message) => format!("Error: {message}"),
        }
    }
}

impl From<CoreError> for ToolResult {
    fn from(err: CoreError) -> Self {
        Self::Failure(err.to_string())
    }
}

/// Deserialize a tool's argument map into its parameter struct.
///
/// `null` (no arguments sent) is read as an empty map so that all-optional tools work.
pub fn parse_arguments<P: DeserializeOwned>(tool: &str, arguments: Value) -> CoreResult<P> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| CoreError::InvalidArguments {
        tool: tool.to_string(),
        detail: e.to_string(),
    })
}
