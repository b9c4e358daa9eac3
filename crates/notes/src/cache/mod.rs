//! Generated-notes cache keyed by file identifier.

mod file;
mod memory;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studynotes_core::config::CacheConfig;

use crate::error::NotesError;

pub use file::FileNoteCache;
pub use memory::MemoryNoteCache;

/// Notes previously generated for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedNote {
    pub file_id: String,
    pub content: String,
    /// Model that produced `content`.
    pub model: String,
    pub created_at: DateTime<Utc>,
}

/// Lookup/persist hooks for generated notes.
pub trait NoteCache: Send + Sync {
    fn lookup(&self, file_id: &str) -> Result<Option<CachedNote>, NotesError>;

    /// Insert or replace the notes for `file_id`.
    fn store(&self, file_id: &str, content: &str, model: &str) -> Result<(), NotesError>;
}

/// Build the cache selected by config: on disk when a directory is set.
pub fn create_cache(config: &CacheConfig) -> Result<Arc<dyn NoteCache>, NotesError> {
    match &config.dir {
        Some(dir) => Ok(Arc::new(FileNoteCache::open(dir)?)),
        None => Ok(Arc::new(MemoryNoteCache::new(config.capacity))),
    }
}
