//! Tool trait definitions.

use async_trait::async_trait;
use futures::StreamExt;
use schemars::JsonSchema;

use crate::types::{Envelope, EnvelopeStream, ToolDefinition};

/// Outcome of one tool invocation.
pub enum ToolResponse {
    Single(Envelope),
    Stream(EnvelopeStream),
}

impl ToolResponse {
    pub fn is_stream(&self) -> bool {
        matches!(self, ToolResponse::Stream(_))
    }

    /// View any response as a stream; a single envelope becomes a
    /// one-element stream.
    pub fn into_stream(self) -> EnvelopeStream {
        match self {
            ToolResponse::Single(envelope) => {
                futures::stream::once(std::future::ready(envelope)).boxed()
            }
            ToolResponse::Stream(stream) => stream,
        }
    }
}

impl std::fmt::Debug for ToolResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolResponse::Single(envelope) => f.debug_tuple("Single").field(envelope).finish(),
            ToolResponse::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Core tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> serde_json::Value;
    async fn call(&self, input: serde_json::Value) -> ToolResponse;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// JSON schema for a tool's input type.
pub fn input_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    let mut value =
        serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({"type": "object"}));

    if let Some(obj) = value.as_object_mut() {
        if !obj.contains_key("properties") {
            obj.insert(
                "properties".to_string(),
                serde_json::Value::Object(serde_json::Map::new()),
            );
        }
        obj.remove("$schema");
    }

    value
}
