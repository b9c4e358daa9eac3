use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat message for the LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Trait for chat model backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one non-streaming chat request and return the trimmed assistant text.
    ///
    /// Exactly one attempt is made; retry policy belongs to the caller.
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError>;

    /// Model name used for the request, recorded alongside cached notes.
    fn model(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("cannot connect to model service at {url}: {reason}")]
    Unreachable { url: String, reason: String },
    #[error(
        "model service timed out after {} seconds; the model may still be loading",
        .after.as_secs()
    )]
    Timeout { after: Duration },
    #[error("API error: {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("HTTP request failed: {0}")]
    HttpError(#[source] reqwest::Error),
    #[error("failed to parse response: {0}")]
    ParseError(String),
}

impl LlmError {
    /// Whether backing off and trying again could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Unreachable { .. } | LlmError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::system("be brief")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");
    }

    #[test]
    fn timeout_message_mentions_warm_up() {
        let err = LlmError::Timeout {
            after: Duration::from_secs(120),
        };
        let msg = err.to_string();
        assert!(msg.contains("120 seconds"));
        assert!(msg.contains("loading"));
        assert!(err.is_transient());
    }

    #[test]
    fn api_errors_are_not_transient() {
        let err = LlmError::ApiError {
            status: 500,
            body: "model not found".into(),
        };
        assert!(!err.is_transient());
        assert!(err.to_string().contains("model not found"));
    }
}
