//! Settings for the outbound search request.

use std::time::Duration;

use super::{ConfigResult, EnvConfigProvider};
use crate::client::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};

/// Parameters of every external-model call made by the search tool.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Model identifier.
    pub model: String,
    /// System instruction framing the model as a search assistant.
    pub system_prompt: String,
    /// Output-length limit.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// API base URL, without the `/v1/...` path.
    pub base_url: String,
    /// HTTP client timeout. The only deadline enforced by this crate.
    pub timeout: Duration,
    /// Optional end-user tag forwarded as the `user` field.
    pub user: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user: None,
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by `OPENAI_BASE_URL`, `OPENAI_SEARCH_MODEL`,
    /// `OPENAI_USER_TAG` and `WEB_SEARCH_TIMEOUT_SECS`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_providers(
            &EnvConfigProvider::prefixed("OPENAI_"),
            &EnvConfigProvider::prefixed("WEB_SEARCH_"),
        )
    }

    pub fn from_providers(
        openai: &EnvConfigProvider,
        service: &EnvConfigProvider,
    ) -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(base_url) = openai.get_raw("base_url")? {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = openai.get_raw("search_model")? {
            config.model = model;
        }
        config.user = openai.get_raw("user_tag")?;
        if let Some(secs) = service.get_parsed::<u64>("timeout_secs")? {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}
