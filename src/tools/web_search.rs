//! The web search tool: validate, authorize, dispatch, redact.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;

use super::traits::{Tool, ToolResponse, input_schema_for};
use crate::Result;
use crate::auth::{Credential, CredentialProvider};
use crate::client::{ChatBackend, CompletionClient, OpenAiAdapter, StreamingClient};
use crate::config::SearchConfig;
use crate::observability::SpanContext;
use crate::query::Query;
use crate::types::{Envelope, EnvelopeStream};

pub const TOOL_NAME: &str = "web_search_tool";

/// Returned when no usable API key can be resolved.
pub const MISSING_CREDENTIAL: &str = "OpenAI API key not configured.";

const DESCRIPTION: &str = "Search the web using OpenAI's search-enabled model. \
Returns a JSON envelope with the answer, or a sequence of incremental fragments when `stream` is true.";

/// Input accepted by [`WebSearchTool`].
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// The search query (1-512 characters).
    pub query: String,
    /// Return incremental fragments instead of a single result.
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    SingleShot,
    Streaming,
}

impl SearchMode {
    pub fn from_flag(stream: bool) -> Self {
        if stream {
            SearchMode::Streaming
        } else {
            SearchMode::SingleShot
        }
    }
}

/// Web search over a [`ChatBackend`].
///
/// Each invocation runs the query validator first, then resolves the API key
/// from the [`CredentialProvider`], then dispatches to the single-shot or
/// streaming client. Every envelope handed back, including each stream
/// fragment, is redacted against the key used for the call.
#[derive(Clone)]
pub struct WebSearchTool {
    completion: CompletionClient,
    streaming: StreamingClient,
    credentials: Arc<dyn CredentialProvider>,
    spans: Arc<SpanContext>,
}

impl WebSearchTool {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        config: SearchConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            completion: CompletionClient::new(Arc::clone(&backend), Arc::clone(&config)),
            streaming: StreamingClient::new(backend, config),
            credentials,
            spans: Arc::new(SpanContext::new()),
        }
    }

    /// Tool backed by the OpenAI Chat Completions API.
    pub fn openai(config: SearchConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let backend = Arc::new(OpenAiAdapter::new(&config)?);
        Ok(Self::new(backend, config, credentials))
    }

    pub async fn run(&self, query: &Value, mode: SearchMode) -> ToolResponse {
        match mode {
            SearchMode::SingleShot => ToolResponse::Single(self.search(query).await),
            SearchMode::Streaming => ToolResponse::Stream(self.search_stream(query)),
        }
    }

    /// Single-shot search. Always returns exactly one envelope.
    pub async fn search(&self, query: &Value) -> Envelope {
        let span = self.spans.tool_execute_span(TOOL_NAME, false);
        async {
            tracing::debug!("search received");
            let query = match validate(query) {
                Ok(query) => query,
                Err(rejected) => return rejected,
            };
            let credential = match self.authorize().await {
                Ok(credential) => credential,
                Err(rejected) => return rejected,
            };
            tracing::debug!("search dispatched");
            let envelope = self
                .completion
                .complete(&query, &credential)
                .await
                .redact(&credential);
            log_outcome(&envelope);
            envelope
        }
        .instrument(span)
        .await
    }

    /// Streaming search. Rejections come back as a one-element stream;
    /// nothing is sent upstream until the stream is first polled.
    pub fn search_stream(&self, query: &Value) -> EnvelopeStream {
        let span = self.spans.tool_execute_span(TOOL_NAME, true);
        let query = match span.in_scope(|| {
            tracing::debug!("search received");
            validate(query)
        }) {
            Ok(query) => query,
            Err(rejected) => return single(rejected),
        };

        let tool = self.clone();
        let opened = async move {
            let credential = match tool.authorize().await {
                Ok(credential) => credential,
                Err(rejected) => return single(rejected),
            };
            tracing::debug!("search dispatched");
            let key = credential.clone();
            let outcome_span = tracing::Span::current();
            tool.streaming
                .stream(query, credential)
                .map(move |envelope| envelope.redact(&key))
                .inspect(move |envelope| {
                    if envelope.is_terminal() {
                        outcome_span.in_scope(|| log_outcome(envelope));
                    }
                })
                .boxed()
        }
        .instrument(span);

        futures::stream::once(opened).flatten().boxed()
    }

    async fn authorize(&self) -> std::result::Result<Credential, Envelope> {
        self.credentials.resolve().await.map_err(|e| {
            tracing::debug!(provider = self.credentials.name(), error = %e, "search rejected: no credential");
            Envelope::rejected(MISSING_CREDENTIAL)
        })
    }
}

fn validate(query: &Value) -> std::result::Result<Query, Envelope> {
    Query::parse(query).map_err(|e| {
        tracing::debug!(reason = %e, "search rejected: invalid query");
        Envelope::rejected(e.to_string())
    })
}

fn single(envelope: Envelope) -> EnvelopeStream {
    futures::stream::once(std::future::ready(envelope)).boxed()
}

fn log_outcome(envelope: &Envelope) {
    match envelope.error() {
        Some(error) => tracing::debug!(error, "search failed"),
        None => tracing::debug!("search completed"),
    }
}

impl std::fmt::Debug for WebSearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchTool")
            .field("credentials", &self.credentials.name())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        input_schema_for::<WebSearchParams>()
    }

    /// A missing `query` is rejected as not-text; a missing or non-boolean
    /// `stream` means single-shot.
    async fn call(&self, input: Value) -> ToolResponse {
        let query = input.get("query").cloned().unwrap_or(Value::Null);
        let stream = input
            .get("stream")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.run(&query, SearchMode::from_flag(stream)).await
    }
}
