//! Study-notes generation: chunking, prompt templates, the map-reduce
//! pipeline over a chat model, and the cache/extraction collaborators
//! that wrap it.

pub mod cache;
pub mod chunker;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod service;

#[cfg(test)]
mod testing;

pub use cache::{create_cache, CachedNote, FileNoteCache, MemoryNoteCache, NoteCache};
pub use chunker::{chunk_text, normalize_text, Chunk};
pub use document::{PlainTextExtractor, TextExtractor};
pub use error::NotesError;
pub use pipeline::NotesPipeline;
pub use service::{GeneratedNotes, NoteService};
