//! Single-shot search client.

use std::sync::Arc;

use tracing::Instrument;

use super::adapter::ChatBackend;
use super::messages::ChatCompletionRequest;
use crate::auth::Credential;
use crate::config::SearchConfig;
use crate::observability::ApiCallSpan;
use crate::query::Query;
use crate::types::Envelope;

/// Non-streaming search client. One request per call, no retries; every
/// outcome comes back as an [`Envelope`].
#[derive(Clone)]
pub struct CompletionClient {
    backend: Arc<dyn ChatBackend>,
    config: Arc<SearchConfig>,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn ChatBackend>, config: Arc<SearchConfig>) -> Self {
        Self { backend, config }
    }

    pub async fn complete(&self, query: &Query, credential: &Credential) -> Envelope {
        let request = ChatCompletionRequest::search(&self.config, query, false);
        let span = ApiCallSpan::new(self.backend.name(), &request.model, false);

        let outcome = self
            .backend
            .send(request, credential)
            .instrument(span.span().clone())
            .await;

        match outcome {
            Ok(completion) => {
                if let Some(usage) = &completion.usage {
                    span.record_usage(usage);
                }
                span.finish("ok");
                Envelope::result(completion.text())
            }
            Err(e) => {
                tracing::warn!(error = %e, category = ?e.category(), "search completion failed");
                span.finish("error");
                Envelope::from_error(&e)
            }
        }
    }
}
