//! Credential provider trait.

use async_trait::async_trait;

use super::Credential;
use crate::Result;

/// Resolves the external-model credential at call time.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Provider name for debugging.
    fn name(&self) -> &str;

    /// Resolve credential from this provider.
    async fn resolve(&self) -> Result<Credential>;
}
