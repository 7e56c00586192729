//! Tools exposed by the server.

mod traits;
mod web_search;

pub use traits::{Tool, ToolResponse, input_schema_for};
pub use web_search::{
    MISSING_CREDENTIAL, SearchMode, TOOL_NAME, WebSearchParams, WebSearchTool,
};
