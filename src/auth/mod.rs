//! Authentication for the external model.
//!
//! The API key is resolved through a [`CredentialProvider`] on every tool
//! invocation and held in a [`Credential`] only for the outbound request.

mod credential;
mod provider;
mod providers;

pub use credential::Credential;
pub use provider::CredentialProvider;
pub use providers::{DEFAULT_ENV_VAR, EnvironmentProvider, ExplicitProvider};
