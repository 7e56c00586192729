//! Environment variable credential provider.

use async_trait::async_trait;

use crate::auth::{Credential, CredentialProvider};
use crate::{Error, Result};

pub const DEFAULT_ENV_VAR: &str = "OPENAI_API_KEY";

/// Provider that reads the API key from an environment variable on every
/// resolve. Nothing is cached.
pub struct EnvironmentProvider {
    env_var: String,
}

impl EnvironmentProvider {
    /// Create provider using default OPENAI_API_KEY.
    pub fn new() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }

    /// Create provider with custom environment variable.
    pub fn from_var(env_var: impl Into<String>) -> Self {
        Self {
            env_var: env_var.into(),
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentProvider {
    fn name(&self) -> &str {
        "environment"
    }

    async fn resolve(&self) -> Result<Credential> {
        std::env::var(&self.env_var)
            .ok()
            .map(Credential::api_key)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::auth(format!("{} not set", self.env_var)))
    }
}
