//! SSE parsing and the streaming search client.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use pin_project_lite::pin_project;
use serde::Deserialize;
use tracing::Instrument;

use super::adapter::{ChatBackend, ChunkStream};
use super::messages::{ChatCompletionChunk, ChatCompletionRequest, ErrorResponse};
use crate::auth::Credential;
use crate::config::SearchConfig;
use crate::observability::ApiCallSpan;
use crate::query::Query;
use crate::types::{Envelope, EnvelopeStream};
use crate::{Error, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum StreamPayload {
    Error(ErrorResponse),
    Chunk(ChatCompletionChunk),
}

enum Frame {
    Chunk(ChatCompletionChunk),
    Done,
    Failed(Error),
}

pin_project! {
    /// Turns a Chat Completions SSE byte stream into parsed chunks.
    ///
    /// Ends at `data: [DONE]` or when the body ends. After the first error
    /// nothing more is yielded.
    pub struct SseParser<S> {
        #[pin]
        inner: S,
        buffer: Vec<u8>,
        pos: usize,
        finished: bool,
    }
}

impl<S> SseParser<S>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>>,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(4096),
            pos: 0,
            finished: false,
        }
    }

    /// Position and length of the first blank-line delimiter.
    fn find_delimiter(buf: &[u8]) -> Option<(usize, usize)> {
        let lf = buf.windows(2).position(|w| w == b"\n\n");
        let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n");
        match (lf, crlf) {
            (Some(a), Some(b)) if b < a => Some((b, 4)),
            (Some(a), _) => Some((a, 2)),
            (None, Some(b)) => Some((b, 4)),
            (None, None) => None,
        }
    }

    fn extract_data(event_block: &str) -> Option<String> {
        let lines: Vec<&str> = event_block
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|data| data.strip_prefix(' ').unwrap_or(data))
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// A block that is not valid UTF-8, including one cut mid-codepoint at
    /// end of body, fails the stream.
    fn decode_event(raw: &[u8]) -> Option<Frame> {
        match std::str::from_utf8(raw) {
            Ok(block) => Self::parse_event(block),
            Err(e) => Some(Frame::Failed(Error::Stream(format!(
                "Invalid UTF-8 in event: {}",
                e
            )))),
        }
    }

    fn parse_event(event_block: &str) -> Option<Frame> {
        let trimmed = event_block.trim();
        if trimmed.is_empty() || trimmed.starts_with(':') {
            return None;
        }
        let data = Self::extract_data(event_block)?;
        let data = data.trim();
        if data.is_empty() {
            return None;
        }
        if data == "[DONE]" {
            return Some(Frame::Done);
        }
        match serde_json::from_str::<StreamPayload>(data) {
            Ok(StreamPayload::Chunk(chunk)) => Some(Frame::Chunk(chunk)),
            Ok(StreamPayload::Error(error)) => Some(Frame::Failed(error.into_error(None))),
            Err(e) => {
                tracing::warn!("Failed to parse stream event: {} - data: {}", e, data);
                Some(Frame::Failed(Error::Json(e)))
            }
        }
    }
}

impl<S> Stream for SseParser<S>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>>,
{
    type Item = Result<ChatCompletionChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if let Some((rel_pos, delim_len)) = Self::find_delimiter(&this.buffer[*this.pos..]) {
                let start_pos = *this.pos;
                let end_pos = start_pos + rel_pos;
                let frame = Self::decode_event(&this.buffer[start_pos..end_pos]);
                *this.pos = end_pos + delim_len;

                if this.buffer.len() > 8192 && *this.pos > this.buffer.len() / 2 {
                    this.buffer.drain(..*this.pos);
                    *this.pos = 0;
                }

                match frame {
                    Some(Frame::Chunk(chunk)) => return Poll::Ready(Some(Ok(chunk))),
                    Some(Frame::Done) => {
                        *this.finished = true;
                        return Poll::Ready(None);
                    }
                    Some(Frame::Failed(e)) => {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    None => continue,
                }
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    if *this.pos > 0 && this.buffer.len() + bytes.len() > 16384 {
                        this.buffer.drain(..*this.pos);
                        *this.pos = 0;
                    }
                    this.buffer.extend_from_slice(&bytes);
                }
                Poll::Ready(Some(Err(e))) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(Error::Network(e))));
                }
                Poll::Ready(None) => {
                    *this.finished = true;
                    if *this.pos < this.buffer.len() {
                        let frame = Self::decode_event(&this.buffer[*this.pos..]);
                        match frame {
                            Some(Frame::Chunk(chunk)) => return Poll::Ready(Some(Ok(chunk))),
                            Some(Frame::Failed(e)) => return Poll::Ready(Some(Err(e))),
                            Some(Frame::Done) | None => {}
                        }
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

enum StreamState {
    Connect {
        backend: Arc<dyn ChatBackend>,
        request: ChatCompletionRequest,
        credential: Credential,
    },
    Receive {
        chunks: ChunkStream,
        span: ApiCallSpan,
        fragments: u64,
    },
    Finished,
}

/// Incremental-mode search client.
///
/// Every [`stream`](Self::stream) call is one-shot: the request is sent on
/// first poll, each non-empty delta is forwarded as it arrives, and the
/// sequence ends with exactly one `done` marker or exactly one failure.
#[derive(Clone)]
pub struct StreamingClient {
    backend: Arc<dyn ChatBackend>,
    config: Arc<SearchConfig>,
}

impl StreamingClient {
    pub fn new(backend: Arc<dyn ChatBackend>, config: Arc<SearchConfig>) -> Self {
        Self { backend, config }
    }

    pub fn stream(&self, query: Query, credential: Credential) -> EnvelopeStream {
        let request = ChatCompletionRequest::search(&self.config, &query, true);
        let state = StreamState::Connect {
            backend: Arc::clone(&self.backend),
            request,
            credential,
        };
        futures::stream::unfold(state, next_envelope).boxed()
    }
}

async fn next_envelope(state: StreamState) -> Option<(Envelope, StreamState)> {
    let (mut chunks, span, mut fragments) = match state {
        StreamState::Connect {
            backend,
            request,
            credential,
        } => {
            let span = ApiCallSpan::new(backend.name(), &request.model, true);
            let connected = backend
                .send_stream(request, &credential)
                .instrument(span.span().clone())
                .await;
            match connected {
                Ok(chunks) => (chunks, span, 0),
                Err(e) => {
                    tracing::warn!(error = %e, category = ?e.category(), "search stream failed to open");
                    span.finish("error");
                    return Some((Envelope::from_error(&e), StreamState::Finished));
                }
            }
        }
        StreamState::Receive {
            chunks,
            span,
            fragments,
        } => (chunks, span, fragments),
        StreamState::Finished => return None,
    };

    loop {
        match chunks.next().await {
            Some(Ok(chunk)) => {
                if let Some(usage) = &chunk.usage {
                    span.record_usage(usage);
                }
                if let Some(text) = chunk.delta_text() {
                    fragments += 1;
                    let envelope = Envelope::delta(text);
                    return Some((
                        envelope,
                        StreamState::Receive {
                            chunks,
                            span,
                            fragments,
                        },
                    ));
                }
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, category = ?e.category(), fragments, "search stream interrupted");
                span.record_fragments(fragments);
                span.finish("error");
                return Some((Envelope::from_error(&e), StreamState::Finished));
            }
            None => {
                span.record_fragments(fragments);
                span.finish("ok");
                return Some((Envelope::done(), StreamState::Finished));
            }
        }
    }
}
