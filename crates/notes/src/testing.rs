//! In-process provider for pipeline and service tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use studynotes_llm::{LlmError, LlmProvider, Message, Role};

/// Replays queued results in order, then answers `summary N` for call N.
/// Every request is recorded.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn counting() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }

    /// The user message of each call, in call order.
    pub(crate) fn user_prompts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|messages| {
                messages
                    .into_iter()
                    .find(|m| m.role == Role::User)
                    .map(|m| m.content)
                    .unwrap_or_default()
            })
            .collect()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages);
            calls.len()
        };
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => Ok(format!("summary {n}")),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
