use std::sync::Arc;

use web_search_mcp::observability::{TracingConfig, init_tracing};
use web_search_mcp::{EnvironmentProvider, SearchConfig, ServerConfig, WebSearchTool, server};

#[tokio::main]
async fn main() -> web_search_mcp::Result<()> {
    init_tracing(&TracingConfig::new());

    let search = SearchConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;
    tracing::info!(model = %search.model, base_url = %search.base_url, "Loaded search configuration");

    let credentials = Arc::new(EnvironmentProvider::new());
    let tool = Arc::new(WebSearchTool::openai(search, credentials)?);

    server::serve(&server_config, tool).await
}
