//! Core types shared by the clients, the tool and the HTTP surface.

mod envelope;
mod tool;

pub use envelope::{Envelope, EnvelopeStream};
pub use tool::ToolDefinition;
