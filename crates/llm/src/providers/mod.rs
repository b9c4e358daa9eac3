pub mod ollama;

use std::sync::Arc;

use studynotes_core::config::OllamaConfig;

use crate::provider::LlmProvider;

/// Create the chat provider the notes pipeline talks to.
pub fn create_provider(ollama_config: &OllamaConfig) -> Arc<dyn LlmProvider> {
    Arc::new(ollama::OllamaProvider::from_config(ollama_config))
}
