//! Chat Completions wire types.

mod request;
mod types;

pub use request::{ChatCompletionRequest, ChatMessage, Role};
pub use types::{
    ChatCompletion, ChatCompletionChunk, Choice, ChunkChoice, ChunkDelta, ErrorDetail,
    ErrorResponse, ResponseMessage, Usage,
};
