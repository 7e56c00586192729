//! In-process backends for orchestrator tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use web_search_mcp::client::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, ChunkStream};
use web_search_mcp::{ChatBackend, Credential, Error, Result};

/// How the mock answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Fixed completion text; streamed as one fragment.
    Answer(String),
    /// Streamed fragments; concatenated for single-shot.
    Fragments(Vec<String>),
    /// Fragments followed by a stream failure.
    Interrupted(Vec<String>, String),
    /// Echoes the bearer key back in its answer.
    EchoKey,
    /// HTTP-style API error.
    Api(u16, String),
    /// Failure outside the API protocol layer.
    Broken(String),
    /// Fragments, then the stream stays open without ending.
    Stalled(Vec<String>),
}

/// Flags the chunk stream as released once it is dropped.
struct ReleaseGuard(Arc<AtomicBool>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct MockBackend {
    behavior: Behavior,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatCompletionRequest>>,
    released: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn answer(text: &str) -> Self {
        Self::new(Behavior::Answer(text.to_string()))
    }

    pub fn fragments(parts: &[&str]) -> Self {
        Self::new(Behavior::Fragments(
            parts.iter().map(|p| p.to_string()).collect(),
        ))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// True once the last chunk stream handed out has been dropped.
    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: ChatCompletionRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
    }

    fn error(&self) -> Option<Error> {
        match &self.behavior {
            Behavior::Api(status, message) => Some(Error::Api {
                message: message.clone(),
                status: Some(*status),
                error_type: None,
            }),
            Behavior::Broken(message) => Some(Error::Parse(message.clone())),
            _ => None,
        }
    }

    fn parts(&self, credential: &Credential) -> Vec<String> {
        match &self.behavior {
            Behavior::Answer(text) => vec![text.clone()],
            Behavior::Fragments(parts)
            | Behavior::Interrupted(parts, _)
            | Behavior::Stalled(parts) => parts.clone(),
            Behavior::EchoKey => vec![
                "the key is ".to_string(),
                credential.expose().to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChatCompletion> {
        self.record(request);
        if let Some(e) = self.error() {
            return Err(e);
        }
        Ok(ChatCompletion::from_text(self.parts(credential).concat()))
    }

    async fn send_stream(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChunkStream> {
        self.record(request);
        if let Some(e) = self.error() {
            return Err(e);
        }
        let mut items: Vec<Result<ChatCompletionChunk>> = self
            .parts(credential)
            .into_iter()
            .map(|p| Ok(ChatCompletionChunk::from_text(p)))
            .collect();
        if let Behavior::Interrupted(_, message) = &self.behavior {
            items.push(Err(Error::Stream(message.clone())));
        }
        self.released.store(false, Ordering::SeqCst);
        let guard = ReleaseGuard(Arc::clone(&self.released));
        let chunks = futures::stream::iter(items);
        let chunks = if matches!(self.behavior, Behavior::Stalled(_)) {
            chunks.chain(futures::stream::pending()).boxed()
        } else {
            chunks.boxed()
        };
        Ok(chunks
            .map(move |item| {
                let _held = &guard;
                item
            })
            .boxed())
    }
}
