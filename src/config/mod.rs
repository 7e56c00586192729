//! Configuration loaded from the process environment.
//!
//! ```rust,no_run
//! use web_search_mcp::config::{SearchConfig, ServerConfig};
//!
//! # fn example() -> Result<(), web_search_mcp::config::ConfigError> {
//! let search = SearchConfig::from_env()?;
//! let server = ServerConfig::from_env()?;
//! # Ok(())
//! # }
//! ```
//!
//! The API key is not part of these values; it is resolved per
//! call through [`crate::auth::CredentialProvider`].

pub mod env;
pub mod search;
pub mod server;

pub use env::EnvConfigProvider;
pub use search::SearchConfig;
pub use server::ServerConfig;

use thiserror::Error;

/// Errors that can occur in configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The key with invalid value
        key: String,
        /// Error message
        message: String,
    },

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
