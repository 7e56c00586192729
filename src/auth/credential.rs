//! Credential types.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// API key used to authenticate to the external model.
///
/// Wraps a [`SecretString`]: zeroized on drop, never serialized, and `Debug`
/// prints `[REDACTED]`.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Create API Key credential.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Raw key, for building the `Authorization` header and for redaction.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}
