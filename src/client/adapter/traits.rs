//! Backend trait for the external chat model.

use std::fmt::Debug;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::Result;
use crate::auth::Credential;
use crate::client::messages::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest};

/// Parsed chunks of one streamed response. Dropping it releases the
/// underlying connection.
pub type ChunkStream = BoxStream<'static, Result<ChatCompletionChunk>>;

/// One outbound call to the external model, single-shot or streamed.
///
/// Implementations report every failure as `Err`; the completion and
/// streaming clients turn those into envelopes.
#[async_trait]
pub trait ChatBackend: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    async fn send(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChatCompletion>;

    async fn send_stream(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChunkStream>;
}
