//! # web-search-mcp
//!
//! A single web search tool backed by OpenAI's search-enabled chat models.
//!
//! Queries are validated, forwarded to the external model in single-shot or
//! streaming mode, and every result is shaped into a fixed [`Envelope`] that
//! never carries the API key used for the outbound call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use web_search_mcp::auth::EnvironmentProvider;
//! use web_search_mcp::{SearchConfig, WebSearchTool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), web_search_mcp::Error> {
//!     let tool = WebSearchTool::openai(SearchConfig::from_env()?, Arc::new(EnvironmentProvider::new()))?;
//!     let envelope = tool.search(&serde_json::json!("What is Rust?")).await;
//!     println!("{}", serde_json::to_string(&envelope)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use futures::StreamExt;
//! use web_search_mcp::auth::EnvironmentProvider;
//! use web_search_mcp::{SearchConfig, WebSearchTool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), web_search_mcp::Error> {
//!     let tool = WebSearchTool::openai(SearchConfig::default(), Arc::new(EnvironmentProvider::new()))?;
//!     let mut stream = tool.search_stream(&serde_json::json!("Latest Rust release"));
//!     while let Some(envelope) = stream.next().await {
//!         println!("{}", serde_json::to_string(&envelope)?);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod client;
pub mod config;
pub mod observability;
pub mod query;
pub mod server;
pub mod tools;
pub mod types;

pub use auth::{Credential, CredentialProvider, EnvironmentProvider, ExplicitProvider};
pub use client::{
    ChatBackend, CompletionClient, OpenAiAdapter, StreamingClient, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PROMPT,
};
pub use config::{ConfigError, SearchConfig, ServerConfig};
pub use query::{MAX_QUERY_CHARS, Query, QueryError};
pub use tools::{SearchMode, Tool, ToolResponse, WebSearchTool};
pub use types::{Envelope, EnvelopeStream, ToolDefinition};

/// Error type for web-search-mcp operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// External model API returned an error response.
    #[error("API error (HTTP {status}): {message}", status = status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".into()))]
    Api {
        message: String,
        status: Option<u16>,
        error_type: Option<String>,
    },

    /// Credential missing or rejected.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Network connectivity or request failed.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Streaming response error.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO failure (listener bind, serve loop).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error category used to label failure envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised by the external model's protocol layer: HTTP status, API error
    /// payloads, connection failures, stream interruptions.
    ExternalApi,
    /// Everything else.
    Unexpected,
}

impl ErrorCategory {
    /// Label placed in the `error` field of a failure envelope.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::ExternalApi => "OpenAI API error",
            ErrorCategory::Unexpected => "Unexpected error",
        }
    }
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Api { .. } | Error::Network(_) | Error::Stream(_) => ErrorCategory::ExternalApi,
            Error::Auth { .. }
            | Error::Config(_)
            | Error::Json(_)
            | Error::Parse(_)
            | Error::Io(_) => ErrorCategory::Unexpected,
        }
    }

    pub fn is_external(&self) -> bool {
        self.category() == ErrorCategory::ExternalApi
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            message: "Incorrect API key provided".to_string(),
            status: Some(401),
            error_type: Some("invalid_request_error".to_string()),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[test]
    fn test_error_display_unknown_status() {
        let err = Error::Api {
            message: "boom".to_string(),
            status: None,
            error_type: None,
        };
        assert_eq!(err.to_string(), "API error (HTTP unknown): boom");
    }

    #[test]
    fn test_error_category() {
        let api = Error::Api {
            message: "Rate limit exceeded".to_string(),
            status: Some(429),
            error_type: None,
        };
        assert_eq!(api.category(), ErrorCategory::ExternalApi);
        assert!(api.is_external());
        assert_eq!(api.status_code(), Some(429));

        assert_eq!(
            Error::Stream("connection reset".into()).category(),
            ErrorCategory::ExternalApi
        );
        assert_eq!(
            Error::Parse("bad".into()).category(),
            ErrorCategory::Unexpected
        );
        assert_eq!(
            Error::auth("missing key").category(),
            ErrorCategory::Unexpected
        );
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ErrorCategory::ExternalApi.label(), "OpenAI API error");
        assert_eq!(ErrorCategory::Unexpected.label(), "Unexpected error");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = config::ConfigError::InvalidValue {
            key: "WEB_SEARCH_PORT".to_string(),
            message: "not a number".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Config(_)));
    }
}
