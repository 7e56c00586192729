//! Search query validation.

use std::fmt;

use thiserror::Error;

/// Maximum query length in characters, measured after trimming.
pub const MAX_QUERY_CHARS: usize = 512;

/// Validation failures, surfaced verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Query must be a string.")]
    NotText,

    #[error("Query cannot be empty.")]
    Empty,

    #[error("Query too long (max {MAX_QUERY_CHARS} characters).")]
    TooLong { length: usize },

    #[error("Query contains invalid control characters.")]
    InvalidCharacters,
}

/// A validated, trimmed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Validate a raw tool argument. Anything other than a JSON string is
    /// rejected before any text checks run.
    pub fn parse(raw: &serde_json::Value) -> Result<Self, QueryError> {
        match raw {
            serde_json::Value::String(text) => Self::new(text),
            _ => Err(QueryError::NotText),
        }
    }

    pub fn new(text: &str) -> Result<Self, QueryError> {
        let trimmed = text.trim_matches(is_trimmable);
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        let length = trimmed.chars().count();
        if length > MAX_QUERY_CHARS {
            return Err(QueryError::TooLong { length });
        }

        if trimmed.chars().any(is_forbidden_control) {
            return Err(QueryError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unicode whitespace plus the C0 separators 0x1C-0x1F, which are stripped
/// from both ends rather than rejected.
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1C}'..='\u{1F}')
}

/// 0x00-0x08, 0x0B, 0x0C, 0x0E-0x1F. Tab, LF and CR are allowed.
fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_query_is_trimmed() {
        let query = Query::new("  What is AI?\n").unwrap();
        assert_eq!(query.as_str(), "What is AI?");
    }

    #[test]
    fn test_query_content_is_not_normalized() {
        let query = Query::new("RuSt   Async\tTraits").unwrap();
        assert_eq!(query.as_str(), "RuSt   Async\tTraits");
    }

    #[test]
    fn test_non_string_rejected() {
        for raw in [json!(123), json!(null), json!(true), json!(["a"]), json!({"q": "a"})] {
            assert_eq!(Query::parse(&raw), Err(QueryError::NotText));
        }
        assert_eq!(
            QueryError::NotText.to_string(),
            "Query must be a string."
        );
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        for raw in ["", "   ", "\t\n\r", " \n "] {
            assert_eq!(Query::new(raw), Err(QueryError::Empty));
        }
        assert_eq!(QueryError::Empty.to_string(), "Query cannot be empty.");
    }

    #[test]
    fn test_length_boundary() {
        assert!(Query::new(&"a".repeat(MAX_QUERY_CHARS)).is_ok());
        assert_eq!(
            Query::new(&"a".repeat(MAX_QUERY_CHARS + 1)),
            Err(QueryError::TooLong { length: 513 })
        );
    }

    #[test]
    fn test_length_measured_after_trim() {
        let padded = format!("   {}   ", "b".repeat(MAX_QUERY_CHARS));
        assert!(Query::new(&padded).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let query = "é".repeat(MAX_QUERY_CHARS);
        assert!(query.len() > MAX_QUERY_CHARS);
        assert!(Query::new(&query).is_ok());
    }

    #[test]
    fn test_too_long_message() {
        let err = Query::new(&"x".repeat(600)).unwrap_err();
        assert_eq!(err.to_string(), "Query too long (max 512 characters).");
    }

    #[test]
    fn test_forbidden_control_characters_rejected() {
        let forbidden = (0x00u8..=0x08).chain([0x0B, 0x0C]).chain(0x0E..=0x1F);
        for byte in forbidden {
            let raw = format!("abc{}def", byte as char);
            assert_eq!(
                Query::new(&raw),
                Err(QueryError::InvalidCharacters),
                "byte {byte:#04x} should be rejected"
            );
        }
    }

    #[test]
    fn test_common_whitespace_allowed() {
        let query = Query::new("line one\nline two\r\n\tindented").unwrap();
        assert!(query.as_str().contains('\t'));
    }

    #[test]
    fn test_special_characters_allowed() {
        assert!(Query::new("!@#$%^&*()_+-=[]{}|;':,.<>/?").is_ok());
        assert!(Query::new("DEL \u{7f} is printable enough").is_ok());
    }

    #[test]
    fn test_edge_separators_are_trimmed() {
        for c in ['\u{1C}', '\u{1D}', '\u{1E}', '\u{1F}'] {
            let query = Query::new(&format!("{c}What is AI?{c}")).unwrap();
            assert_eq!(query.as_str(), "What is AI?");
        }
        assert_eq!(Query::new("\u{1F} \u{1C}"), Err(QueryError::Empty));
        assert_eq!(
            Query::new("What\u{1F}is AI?"),
            Err(QueryError::InvalidCharacters)
        );
    }

    #[test]
    fn test_emptiness_checked_before_characters() {
        // 0x0B and 0x0C count as whitespace for trim, so they are stripped first.
        assert_eq!(Query::new("\u{0B}\u{0C}"), Err(QueryError::Empty));
    }
}
