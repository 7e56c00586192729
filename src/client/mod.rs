//! OpenAI Chat Completions clients for the search tool.
//!
//! [`CompletionClient`] handles single-shot calls and [`StreamingClient`]
//! incremental ones. Both sit on a [`ChatBackend`]; [`OpenAiAdapter`] is the
//! HTTP implementation.

pub mod adapter;
mod completion;
pub mod messages;
mod models;
mod streaming;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{ChatBackend, ChunkStream, OpenAiAdapter};
pub use completion::CompletionClient;
pub use messages::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, Usage};
pub use models::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
pub use streaming::{SseParser, StreamingClient};
