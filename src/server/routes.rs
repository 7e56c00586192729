//! HTTP routes for the tool surface.

use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use serde_json::Value;

use crate::tools::{Tool, ToolResponse, WebSearchTool};
use crate::types::ToolDefinition;

pub fn router(tool: Arc<WebSearchTool>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tools", get(list_tools))
        .route("/tools/web_search_tool", post(web_search))
        .with_state(tool)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn list_tools(State(tool): State<Arc<WebSearchTool>>) -> Json<Vec<ToolDefinition>> {
    Json(vec![tool.definition()])
}

/// Envelopes are always returned with 200; `success` carries the outcome.
async fn web_search(State(tool): State<Arc<WebSearchTool>>, Json(input): Json<Value>) -> Response {
    match tool.call(input).await {
        ToolResponse::Single(envelope) => Json(envelope).into_response(),
        ToolResponse::Stream(envelopes) => {
            let events = envelopes.map(|envelope| Event::default().json_data(envelope));
            Sse::new(events)
                .keep_alive(KeepAlive::default())
                .into_response()
        }
    }
}
