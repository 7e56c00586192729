//! Logging setup and structured spans.
//!
//! Spans cover each tool invocation (`tool.execute`) and each outbound model
//! call (`api.call`). Span fields never include the API key or request
//! headers.
//!
//! ```rust,no_run
//! use web_search_mcp::observability::{TracingConfig, init_tracing};
//!
//! init_tracing(&TracingConfig::new());
//! ```

mod spans;

pub use spans::{ApiCallSpan, SpanContext};

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TracingLevel {
    #[default]
    Info,
    Debug,
    Trace,
}

impl TracingLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            TracingLevel::Info => "info",
            TracingLevel::Debug => "debug",
            TracingLevel::Trace => "trace",
        }
    }
}

/// Tracing configuration.
#[derive(Clone, Debug, Default)]
pub struct TracingConfig {
    pub enabled: bool,
    pub level: TracingLevel,
    pub ansi: bool,
}

impl TracingConfig {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ansi: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_filter()))
    }
}

/// Install a global fmt subscriber. Returns false when tracing is disabled
/// or a subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> bool {
    if !config.enabled {
        return false;
    }
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_config() {
        let config = TracingConfig::new().level(TracingLevel::Debug);
        assert!(config.enabled);
        assert_eq!(config.level, TracingLevel::Debug);
        assert!(!TracingConfig::disabled().enabled);
    }

    #[test]
    fn test_disabled_tracing_is_not_installed() {
        assert!(!init_tracing(&TracingConfig::disabled()));
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(TracingLevel::Info.as_filter(), DEFAULT_FILTER);
        assert_eq!(TracingLevel::Trace.as_filter(), "trace");
    }
}
