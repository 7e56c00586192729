//! Structured span definitions for tracing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::{Level, Span, field, span};

use crate::client::messages::Usage;

/// Numbers tool invocations so their spans can be correlated in logs.
#[derive(Debug, Default)]
pub struct SpanContext {
    invocation_id: AtomicU64,
}

impl SpanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_invocation_id(&self) -> u64 {
        self.invocation_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn tool_execute_span(&self, tool_name: &str, streaming: bool) -> Span {
        let invocation_id = self.next_invocation_id();
        span!(
            Level::INFO,
            "tool.execute",
            tool_name = tool_name,
            invocation_id = invocation_id,
            streaming = streaming,
        )
    }
}

/// Tracks one outbound model call.
pub struct ApiCallSpan {
    span: Span,
    start: Instant,
}

impl ApiCallSpan {
    pub fn new(backend: &str, model: &str, streaming: bool) -> Self {
        let span = span!(
            Level::INFO,
            "api.call",
            backend = backend,
            model = model,
            streaming = streaming,
            outcome = field::Empty,
            prompt_tokens = field::Empty,
            completion_tokens = field::Empty,
            fragments = field::Empty,
            latency_ms = field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn record_usage(&self, usage: &Usage) {
        self.span.record("prompt_tokens", usage.prompt_tokens);
        self.span.record("completion_tokens", usage.completion_tokens);
    }

    pub fn record_fragments(&self, count: u64) {
        self.span.record("fragments", count);
    }

    pub fn finish(self, outcome: &str) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.span.record("outcome", outcome);
        self.span.record("latency_ms", latency_ms);
        tracing::debug!(parent: &self.span, latency_ms, outcome, "api call finished");
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
