//! Multi-provider LLM client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::{AiConfig, ProviderKind};

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum number of retries for transient failures.
const MAX_RETRIES: u32 = 3;

/// Where each provider puts the reply text.
const GEMINI_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";
const CLAUDE_TEXT_POINTER: &str = "/content/0/text";

/// Errors from LLM client operations.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key not configured (env: {0})")]
    MissingApiKey(String),
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("Model request timed out")]
    Timeout,
}

/// Build an HTTP client with timeouts configured.
fn build_http_client() -> Result<Client, AiError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AiError::RequestFailed(format!("Failed to build HTTP client: {e}")))
}

/// Determine if a request should be retried based on status code and attempt count.
fn should_retry(status_code: u16, attempt: u32) -> bool {
    if attempt >= MAX_RETRIES {
        return false;
    }
    (500..600).contains(&status_code)
}

/// Exponential backoff: 1s, 2s, 4s.
fn calculate_backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt)
}

/// POST a JSON body, retrying server errors with backoff, and return the JSON reply.
async fn post_json(
    client: &Client,
    url: &str,
    headers: &[(&str, &str)],
    body: &Value,
) -> Result<Value, AiError> {
    let mut attempt = 0;
    loop {
        let mut request = client.post(url).json(body);
        for &(name, value) in headers {
            request = request.header(name, value);
        }
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout
            } else {
                AiError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AiError::ParseError(e.to_string()));
        }

        if should_retry(status.as_u16(), attempt) {
            tracing::debug!(url, status = %status, attempt, "Retrying model request");
            tokio::time::sleep(calculate_backoff(attempt)).await;
            attempt += 1;
            continue;
        }

        let text = response.text().await.unwrap_or_default();
        return Err(AiError::RequestFailed(format!("HTTP {status}: {text}")));
    }
}

/// Pull the reply text out of a provider response.
fn reply_text(json: &Value, pointer: &str) -> Result<String, AiError> {
    json.pointer(pointer)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| AiError::ParseError(format!("No text at {pointer} in model response")))
}

/// Trait for LLM providers.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a completion for a system prompt and user message.
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError>;
}

/// Connection settings shared by the HTTP providers.
#[derive(Debug, Clone)]
struct Endpoint {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl Endpoint {
    fn new(config: &AiConfig, api_key: String) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

/// Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiProvider(Endpoint);

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let ep = &self.0;
        let url = format!("{}/models/{}:generateContent", ep.base_url, ep.model);
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": user }] }],
            "systemInstruction": { "parts": [{ "text": system }] },
            "generationConfig": { "maxOutputTokens": ep.max_tokens }
        });

        let headers = [("x-goog-api-key", ep.api_key.as_str())];
        let json = post_json(&ep.client, &url, &headers, &body).await?;
        reply_text(&json, GEMINI_TEXT_POINTER)
    }
}

/// Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct ClaudeProvider(Endpoint);

#[async_trait]
impl AiProvider for ClaudeProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        let ep = &self.0;
        let url = format!("{}/v1/messages", ep.base_url);
        let body = serde_json::json!({
            "model": ep.model,
            "max_tokens": ep.max_tokens,
            "system": system,
            "messages": [{ "role": "user", "content": user }]
        });

        let headers = [("x-api-key", ep.api_key.as_str()), ("anthropic-version", "2023-06-01")];
        let json = post_json(&ep.client, &url, &headers, &body).await?;
        reply_text(&json, CLAUDE_TEXT_POINTER)
    }
}

/// The configured provider.
#[derive(Debug, Clone)]
pub enum AiClient {
    Gemini(GeminiProvider),
    Claude(ClaudeProvider),
}

impl AiClient {
    /// Create the client named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AiError::MissingApiKey` if the configured API key environment
    /// variable is not set, or `AiError::RequestFailed` if the HTTP client
    /// cannot be built.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AiError::MissingApiKey(config.api_key_env.clone()))?;
        let endpoint = Endpoint::new(config, api_key)?;

        Ok(match config.provider {
            ProviderKind::Gemini => Self::Gemini(GeminiProvider(endpoint)),
            ProviderKind::Claude => Self::Claude(ClaudeProvider(endpoint)),
        })
    }
}

#[async_trait]
impl AiProvider for AiClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AiError> {
        match self {
            Self::Gemini(p) => p.generate(system, user).await,
            Self::Claude(p) => p.generate(system, user).await,
        }
    }
}
