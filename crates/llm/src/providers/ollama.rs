use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use studynotes_core::config::OllamaConfig;

use crate::provider::{LlmError, LlmProvider, Message};

/// Chat provider backed by a local Ollama instance.
///
/// Every call is preceded by a status probe until one succeeds. A probe that
/// gets an answer with a non-success status fails the call; a probe that
/// cannot get an answer at all is only logged.
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    status_url: String,
    model: String,
    timeout: Duration,
    probe_timeout: Duration,
    probed: AtomicBool,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        let url = url.trim_end_matches('/').to_string();
        let defaults = OllamaConfig::default();
        Self {
            client: reqwest::Client::new(),
            status_url: format!("{url}/api/tags"),
            url,
            model,
            timeout: defaults.timeout(),
            probe_timeout: defaults.probe_timeout(),
            probed: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::new(config.url.clone(), config.model.clone())
            .with_status_url(config.status_url.clone())
            .with_timeout(config.timeout())
            .with_probe_timeout(config.probe_timeout())
    }

    pub fn with_status_url(mut self, status_url: String) -> Self {
        self.status_url = status_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.url)
    }

    /// Check the status endpoint once per client.
    async fn probe(&self) -> Result<(), LlmError> {
        if self.probed.load(Ordering::Acquire) {
            return Ok(());
        }

        match self
            .client
            .get(&self.status_url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!(url = %self.status_url, "Ollama is reachable");
                self.probed.store(true, Ordering::Release);
                Ok(())
            }
            Ok(response) => Err(LlmError::Unreachable {
                url: self.status_url.clone(),
                reason: format!("status check returned {}", response.status()),
            }),
            Err(e) => {
                warn!(url = %self.status_url, error = %e, "Ollama status check failed, proceeding anyway");
                Ok(())
            }
        }
    }

    fn classify(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout {
                after: self.timeout,
            }
        } else if err.is_connect() {
            LlmError::Unreachable {
                url: self.chat_url(),
                reason: err.to_string(),
            }
        } else {
            LlmError::HttpError(err)
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        self.probe().await?;

        let url = self.chat_url();
        let prompt_chars: usize = messages.iter().map(|m| m.content.chars().count()).sum();
        debug!(url = %url, model = %self.model, prompt_chars, "Ollama chat request");

        let body = ChatRequest {
            model: &self.model,
            messages: &messages,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::ParseError(format!("missing message.content: {e}")))?;
        let content = parsed.message.content.trim();
        if content.is_empty() {
            return Err(LlmError::ParseError("empty message.content".into()));
        }

        debug!(chars = content.chars().count(), "Ollama response received");
        Ok(content.to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
