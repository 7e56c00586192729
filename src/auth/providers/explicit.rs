//! Explicit credential provider.

use async_trait::async_trait;

use crate::auth::{Credential, CredentialProvider};
use crate::{Error, Result};

/// Provider with an explicitly set key, or explicitly none.
pub struct ExplicitProvider {
    credential: Option<Credential>,
}

impl ExplicitProvider {
    /// Create with credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
        }
    }

    /// Create with API key.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::new(Credential::api_key(key))
    }

    /// Provider that never yields a credential.
    pub fn missing() -> Self {
        Self { credential: None }
    }
}

#[async_trait]
impl CredentialProvider for ExplicitProvider {
    fn name(&self) -> &str {
        "explicit"
    }

    async fn resolve(&self) -> Result<Credential> {
        self.credential
            .clone()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::auth("no API key configured"))
    }
}
