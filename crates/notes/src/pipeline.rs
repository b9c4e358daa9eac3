//! Map-reduce note generation.
//!
//! Short texts go to the model in one direct prompt. Longer texts are
//! chunked, each chunk is summarized in document order, and the joined
//! summaries are reduced into the final notes. Calls are strictly
//! sequential and any failure aborts the whole run.

use std::sync::Arc;

use studynotes_core::config::NotesConfig;
use studynotes_llm::{LlmProvider, Message};
use tracing::{debug, info};

use crate::chunker::chunk_text;
use crate::error::NotesError;
use crate::prompts::{chunk_summary_prompt, direct_notes_prompt, reduce_prompt, SYSTEM_PROMPT};

pub struct NotesPipeline {
    provider: Arc<dyn LlmProvider>,
    max_chunk_size: usize,
    short_text_threshold: usize,
}

impl NotesPipeline {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &NotesConfig) -> Self {
        Self {
            provider,
            max_chunk_size: config.max_chunk_size,
            short_text_threshold: config.short_text_threshold,
        }
    }

    /// Model name of the underlying provider.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Turn the full text of a document into study notes.
    pub async fn generate_notes(&self, full_text: &str) -> Result<String, NotesError> {
        let stripped_len = full_text.trim().chars().count();
        if stripped_len == 0 {
            return Err(NotesError::EmptyInput);
        }

        if stripped_len < self.short_text_threshold {
            info!(chars = stripped_len, "text is short, skipping chunking");
            let notes = self.ask(direct_notes_prompt(full_text)).await?;
            debug!(chars = notes.chars().count(), "notes generated");
            return Ok(notes);
        }

        let chunks = chunk_text(full_text, self.max_chunk_size);
        if chunks.is_empty() {
            return Err(NotesError::EmptyInput);
        }
        info!(chunks = chunks.len(), max_chunk_size = self.max_chunk_size, "text split into chunks");

        let total = chunks.len();
        let mut summaries = Vec::with_capacity(total);
        for chunk in &chunks {
            info!(chunk = chunk.index + 1, total, chars = chunk.char_len(), "summarizing chunk");
            let summary = self.ask(chunk_summary_prompt(&chunk.content)).await?;
            debug!(chunk = chunk.index + 1, chars = summary.chars().count(), "chunk summarized");
            summaries.push(summary);
        }

        let combined = summaries.join(" ");
        debug!(chars = combined.chars().count(), "combined chunk summaries");

        let notes = self.ask(reduce_prompt(&combined)).await?;
        info!(chars = notes.chars().count(), "final notes generated");
        Ok(notes)
    }

    async fn ask(&self, prompt: String) -> Result<String, NotesError> {
        let messages = vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)];
        Ok(self.provider.complete(messages).await?)
    }
}
