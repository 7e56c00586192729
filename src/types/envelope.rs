//! Result envelopes returned across the tool boundary.

use futures::stream::BoxStream;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::Error;
use crate::auth::Credential;

const REDACTED: &str = "[REDACTED]";

/// Ordered sequence of envelopes produced by a streaming invocation.
pub type EnvelopeStream = BoxStream<'static, Envelope>;

/// Structured success/failure result for one call or one streamed fragment.
///
/// The shape is closed: there is no slot for a credential, and
/// [`Envelope::redact`] scrubs the key from every text field on top of that.
///
/// | variant   | JSON                                                   |
/// |-----------|--------------------------------------------------------|
/// | `Result`  | `{"success": true, "result": "..."}`                   |
/// | `Delta`   | `{"success": true, "delta": "..."}`                    |
/// | `Done`    | `{"success": true, "done": true}`                      |
/// | `Failure` | `{"success": false, "error": "...", "details": "..."}` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Result { text: String },
    Delta { text: String },
    Done,
    Failure {
        error: String,
        details: Option<String>,
    },
}

impl Envelope {
    pub fn result(text: impl Into<String>) -> Self {
        Self::Result { text: text.into() }
    }

    pub fn delta(text: impl Into<String>) -> Self {
        Self::Delta { text: text.into() }
    }

    pub fn done() -> Self {
        Self::Done
    }

    /// Failure without diagnostics, used for validation and configuration
    /// rejections.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            details: Some(details.into()),
        }
    }

    /// Classify an external-call error into a failure envelope.
    pub fn from_error(err: &Error) -> Self {
        Self::failure(err.category().label(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// `Done` and `Failure` end a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failure { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Result { text } | Self::Delta { text } => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Failure { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    /// Replace every occurrence of the credential in text fields.
    pub fn redact(self, credential: &Credential) -> Self {
        let secret = credential.expose();
        if secret.is_empty() {
            return self;
        }
        let scrub = |s: String| {
            if s.contains(secret) {
                s.replace(secret, REDACTED)
            } else {
                s
            }
        };
        match self {
            Self::Result { text } => Self::Result { text: scrub(text) },
            Self::Delta { text } => Self::Delta { text: scrub(text) },
            Self::Done => Self::Done,
            Self::Failure { error, details } => Self::Failure {
                error: scrub(error),
                details: details.map(scrub),
            },
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Result { text } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("result", text)?;
                map.end()
            }
            Self::Delta { text } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("delta", text)?;
                map.end()
            }
            Self::Done => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("done", &true)?;
                map.end()
            }
            Self::Failure { error, details } => {
                let len = if details.is_some() { 3 } else { 2 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(details) = details {
                    map.serialize_entry("details", details)?;
                }
                map.end()
            }
        }
    }
}
