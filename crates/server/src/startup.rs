//! Server startup: shared state initialization from config.

use std::sync::Arc;

use tracing::info;

use studynotes_notes::{create_cache, NoteService, NotesPipeline, PlainTextExtractor};

use crate::state::AppState;

/// Wire the model provider, pipeline, cache and extractor into `AppState`.
pub fn build_app_state(config: &studynotes_core::Config) -> anyhow::Result<Arc<AppState>> {
    let provider = studynotes_llm::create_provider(&config.ollama);
    info!(url = %config.ollama.url, model = %config.ollama.model, "model provider ready");

    let pipeline = NotesPipeline::new(provider, &config.notes);
    let cache = create_cache(&config.cache)?;
    let notes = NoteService::new(pipeline, cache, Arc::new(PlainTextExtractor));

    Ok(Arc::new(AppState::new(notes, config.server.max_concurrent)))
}
