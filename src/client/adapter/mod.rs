//! External model backends.

mod openai;
mod traits;

pub use openai::OpenAiAdapter;
pub use traits::{ChatBackend, ChunkStream};
