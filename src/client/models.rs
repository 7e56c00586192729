//! Model and request defaults for the search backend.

use std::time::Duration;

/// Search-enabled chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-search-preview";
/// System instruction sent ahead of every query.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful web search assistant.";
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
