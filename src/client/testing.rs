//! Scripted backend for client unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;

use super::adapter::{ChatBackend, ChunkStream};
use super::messages::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest};
use crate::auth::Credential;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(&'static str),
    NoChoices,
    Fragments(Vec<&'static str>),
    FragmentsThenError(Vec<&'static str>, &'static str),
    Api(u16, &'static str),
    Unexpected(&'static str),
}

#[derive(Debug)]
pub struct ScriptedBackend {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
    last_key: Mutex<Option<String>>,
}

impl ScriptedBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_key: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().unwrap().clone()
    }

    fn record(&self, request: ChatCompletionRequest, credential: &Credential) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        *self.last_key.lock().unwrap() = Some(credential.expose().to_string());
    }

    fn failure(&self) -> Option<Error> {
        match &self.reply {
            Reply::Api(status, message) => Some(Error::Api {
                message: message.to_string(),
                status: Some(*status),
                error_type: None,
            }),
            Reply::Unexpected(message) => Some(Error::Parse(message.to_string())),
            _ => None,
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn send(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChatCompletion> {
        self.record(request, credential);
        if let Some(e) = self.failure() {
            return Err(e);
        }
        Ok(match &self.reply {
            Reply::Text(text) => ChatCompletion::from_text(*text),
            Reply::Fragments(parts) | Reply::FragmentsThenError(parts, _) => {
                ChatCompletion::from_text(parts.concat())
            }
            _ => ChatCompletion::default(),
        })
    }

    async fn send_stream(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChunkStream> {
        self.record(request, credential);
        if let Some(e) = self.failure() {
            return Err(e);
        }
        let (parts, tail) = match &self.reply {
            Reply::Text(text) => (vec![*text], None),
            Reply::Fragments(parts) => (parts.clone(), None),
            Reply::FragmentsThenError(parts, message) => (parts.clone(), Some(*message)),
            _ => (Vec::new(), None),
        };
        let mut items: Vec<Result<ChatCompletionChunk>> = parts
            .into_iter()
            .map(|p| Ok(ChatCompletionChunk::from_text(p)))
            .collect();
        if let Some(message) = tail {
            items.push(Err(Error::Stream(message.to_string())));
        }
        Ok(futures::stream::iter(items).boxed())
    }
}
