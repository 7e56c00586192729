//! OpenAI Chat Completions adapter.

use async_trait::async_trait;
use futures::StreamExt;

use super::traits::{ChatBackend, ChunkStream};
use crate::auth::Credential;
use crate::client::messages::{ChatCompletion, ChatCompletionRequest, ErrorResponse};
use crate::client::streaming::SseParser;
use crate::config::SearchConfig;
use crate::{Error, Result};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Talks to `POST {base_url}/v1/chat/completions` with bearer auth.
#[derive(Clone)]
pub struct OpenAiAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiAdapter {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Network)?;
        Ok(Self::with_http(http, &config.base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, COMPLETIONS_PATH)
    }

    async fn post(
        &self,
        request: &ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await?;
        Self::check_response(response).await
    }

    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error) => Err(error.into_error(Some(code))),
            Err(_) => Err(Error::Api {
                message: if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body
                },
                status: Some(code),
                error_type: None,
            }),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiAdapter {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn send(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChatCompletion> {
        let request = request.with_stream(false);
        let response = self.post(&request, credential).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_stream(
        &self,
        request: ChatCompletionRequest,
        credential: &Credential,
    ) -> Result<ChunkStream> {
        let request = request.with_stream(true);
        let response = self.post(&request, credential).await?;
        Ok(SseParser::new(response.bytes_stream()).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let adapter = OpenAiAdapter::with_http(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(adapter.base_url(), "http://localhost:8080");
        assert_eq!(
            adapter.endpoint(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_omits_client() {
        let adapter = OpenAiAdapter::new(&SearchConfig::default()).unwrap();
        let debug = format!("{:?}", adapter);
        assert!(debug.contains("api.openai.com"));
    }
}
