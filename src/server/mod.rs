//! axum server exposing the search tool over HTTP.
//!
//! | route                         | response                               |
//! |-------------------------------|----------------------------------------|
//! | `GET /health`                 | `OK` as text/plain                     |
//! | `GET /tools`                  | tool definitions                       |
//! | `POST /tools/web_search_tool` | JSON envelope, or SSE when `stream`    |

mod routes;

pub use routes::router;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::ServerConfig;
use crate::tools::WebSearchTool;

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, tool: Arc<WebSearchTool>) -> Result<()> {
    let app = router(tool).layer(TraceLayer::new_for_http());
    let addr = config.socket_addr()?;

    tracing::info!("Starting web search server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web search server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
