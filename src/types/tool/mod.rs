//! Tool-related types.

mod definition;

pub use definition::ToolDefinition;
