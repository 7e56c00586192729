//! Credential provider implementations.

mod environment;
mod explicit;

pub use environment::{DEFAULT_ENV_VAR, EnvironmentProvider};
pub use explicit::ExplicitProvider;
