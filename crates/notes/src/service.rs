//! Cache-aware note generation for stored files.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::cache::NoteCache;
use crate::document::TextExtractor;
use crate::error::NotesError;
use crate::pipeline::NotesPipeline;

/// Notes for one file, plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedNotes {
    pub file_id: String,
    pub notes: String,
    pub cached: bool,
    pub model: String,
}

/// Ties the pipeline to its collaborators: a cache keyed by file id and an
/// extractor that turns file bytes into text. Failed runs never touch the cache.
pub struct NoteService {
    pipeline: NotesPipeline,
    cache: Arc<dyn NoteCache>,
    extractor: Arc<dyn TextExtractor>,
}

impl NoteService {
    pub fn new(
        pipeline: NotesPipeline,
        cache: Arc<dyn NoteCache>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            pipeline,
            cache,
            extractor,
        }
    }

    pub fn model(&self) -> &str {
        self.pipeline.model()
    }

    /// Notes for already-extracted text.
    pub async fn notes_for_text(&self, file_id: &str, text: &str) -> Result<GeneratedNotes, NotesError> {
        if let Some(hit) = self.cached(file_id)? {
            return Ok(hit);
        }
        self.generate(file_id, text).await
    }

    /// Notes for a stored file. The cache is checked before extraction.
    pub async fn notes_for_document(
        &self,
        file_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<GeneratedNotes, NotesError> {
        if let Some(hit) = self.cached(file_id)? {
            return Ok(hit);
        }
        let text = self.extractor.extract(bytes, filename)?;
        info!(file_id, chars = text.chars().count(), "extracted text");
        self.generate(file_id, &text).await
    }

    /// Always regenerate, replacing any cached notes.
    pub async fn regenerate(&self, file_id: &str, text: &str) -> Result<GeneratedNotes, NotesError> {
        self.generate(file_id, text).await
    }

    fn cached(&self, file_id: &str) -> Result<Option<GeneratedNotes>, NotesError> {
        match self.cache.lookup(file_id)? {
            Some(note) => {
                info!(file_id, model = %note.model, "found cached notes");
                Ok(Some(GeneratedNotes {
                    file_id: file_id.to_string(),
                    notes: note.content,
                    cached: true,
                    model: note.model,
                }))
            }
            None => {
                info!(file_id, "no cached notes");
                Ok(None)
            }
        }
    }

    async fn generate(&self, file_id: &str, text: &str) -> Result<GeneratedNotes, NotesError> {
        let notes = self.pipeline.generate_notes(text).await?;
        let model = self.pipeline.model().to_string();
        self.cache.store(file_id, &notes, &model)?;
        info!(file_id, chars = notes.chars().count(), "notes saved");
        Ok(GeneratedNotes {
            file_id: file_id.to_string(),
            notes,
            cached: false,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use studynotes_core::config::NotesConfig;
    use studynotes_llm::LlmError;

    use super::*;
    use crate::cache::MemoryNoteCache;
    use crate::document::PlainTextExtractor;
    use crate::testing::ScriptedProvider;

    fn service(provider: Arc<ScriptedProvider>, cache: Arc<MemoryNoteCache>) -> NoteService {
        let pipeline = NotesPipeline::new(provider, &NotesConfig::default());
        NoteService::new(pipeline, cache, Arc::new(PlainTextExtractor))
    }

    #[tokio::test]
    async fn miss_generates_and_stores() {
        let provider = ScriptedProvider::new(vec![Ok("Notes on cells.".into())]);
        let cache = Arc::new(MemoryNoteCache::new(8));
        let svc = service(provider.clone(), cache.clone());

        let out = svc.notes_for_text("bio.txt", "Cells divide by mitosis.").await.unwrap();

        assert_eq!(
            out,
            GeneratedNotes {
                file_id: "bio.txt".into(),
                notes: "Notes on cells.".into(),
                cached: false,
                model: "scripted".into(),
            }
        );
        let stored = cache.lookup("bio.txt").unwrap().unwrap();
        assert_eq!(stored.content, "Notes on cells.");
        assert_eq!(stored.model, "scripted");
    }

    #[tokio::test]
    async fn hit_skips_the_model() {
        let provider = ScriptedProvider::counting();
        let cache = Arc::new(MemoryNoteCache::new(8));
        cache.store("bio.txt", "Earlier notes.", "llama3").unwrap();
        let svc = service(provider.clone(), cache);

        let out = svc.notes_for_text("bio.txt", "Cells divide by mitosis.").await.unwrap();

        assert!(out.cached);
        assert_eq!(out.notes, "Earlier notes.");
        assert_eq!(out.model, "llama3");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let provider = ScriptedProvider::new(vec![Err(LlmError::Timeout {
            after: Duration::from_secs(120),
        })]);
        let cache = Arc::new(MemoryNoteCache::new(8));
        let svc = service(provider, cache.clone());

        let err = svc.notes_for_text("bio.txt", "Cells divide.").await.unwrap_err();

        assert!(matches!(err, NotesError::ServiceTimeout(_)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn document_hit_skips_extraction() {
        let provider = ScriptedProvider::counting();
        let cache = Arc::new(MemoryNoteCache::new(8));
        cache.store("slides.pdf", "Cached slide notes.", "llama3").unwrap();
        let svc = service(provider.clone(), cache);

        // A PDF would be rejected by the extractor, so a hit must come first.
        let out = svc
            .notes_for_document("slides.pdf", "slides.pdf", b"%PDF-1.7")
            .await
            .unwrap();
        assert!(out.cached);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn document_extraction_errors_propagate() {
        let provider = ScriptedProvider::counting();
        let svc = service(provider.clone(), Arc::new(MemoryNoteCache::new(8)));

        let err = svc
            .notes_for_document("empty.txt", "empty.txt", b"\n\n")
            .await
            .unwrap_err();
        assert!(matches!(err, NotesError::NoReadableText));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn document_miss_extracts_then_generates() {
        let provider = ScriptedProvider::new(vec![Ok("Week 1 notes.".into())]);
        let svc = service(provider.clone(), Arc::new(MemoryNoteCache::new(8)));

        let out = svc
            .notes_for_document("id-1", "week1.md", b"# Week 1\n\nNewton's laws.")
            .await
            .unwrap();
        assert_eq!(out.notes, "Week 1 notes.");
        assert!(provider.user_prompts()[0].contains("Newton's laws."));
    }

    #[tokio::test]
    async fn regenerate_replaces_cached_notes() {
        let provider = ScriptedProvider::new(vec![Ok("Fresh notes.".into())]);
        let cache = Arc::new(MemoryNoteCache::new(8));
        cache.store("bio.txt", "Stale notes.", "llama2").unwrap();
        let svc = service(provider, cache.clone());

        let out = svc.regenerate("bio.txt", "Cells divide.").await.unwrap();
        assert!(!out.cached);
        assert_eq!(cache.lookup("bio.txt").unwrap().unwrap().content, "Fresh notes.");
    }
}
