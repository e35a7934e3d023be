// src/client.rs
use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{ChatRequest, ChatResponse};

pub const PROXY_VAR: &str = "GITPILOTAI_PROXY";

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;
}

pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().timeout(std::time::Duration::from_secs(120));

        if let Ok(proxy_url) = std::env::var(PROXY_VAR) {
            let proxy_url = proxy_url.trim();
            if !proxy_url.is_empty() {
                builder = builder.proxy(Proxy::all(proxy_url)?);
            }
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.credential.expose().to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest::user(&self.model, prompt, self.max_tokens);
        debug!(%url, model = %self.model, prompt_chars = prompt.len(), "sending completion request");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body_chars = body.len(), "completion response received");

        interpret_response(status, &body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Maps a raw HTTP reply to the reply text or the matching error.
///
/// A populated `error` field always wins over any choices.
fn interpret_response(status: reqwest::StatusCode, body: &str) -> Result<String> {
    let status_error = || {
        let excerpt: String = body.chars().take(500).collect();
        Error::Api(format!("{}: {}", status, excerpt))
    };

    let resp: ChatResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) if status.is_success() => return Err(Error::Decode(e)),
        Err(_) => return Err(status_error()),
    };

    if let Some(message) = resp.error_message() {
        return Err(Error::Api(message));
    }
    if !status.is_success() {
        return Err(status_error());
    }

    let choice = resp.choices.into_iter().next().ok_or(Error::EmptyResponse)?;
    debug!(role = ?choice.message.role, "using first choice");
    choice.message.content.ok_or(Error::EmptyResponse)
}
