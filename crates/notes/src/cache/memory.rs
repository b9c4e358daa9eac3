use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use lru::LruCache;
use tracing::debug;

use super::{CachedNote, NoteCache};
use crate::error::NotesError;

/// Process-local LRU cache of generated notes.
pub struct MemoryNoteCache {
    cache: Mutex<LruCache<String, CachedNote>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryNoteCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, LruCache<String, CachedNote>>, NotesError> {
        self.cache
            .lock()
            .map_err(|_| NotesError::Cache("memory cache lock poisoned".into()))
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    pub fn len(&self) -> usize {
        self.locked().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoteCache for MemoryNoteCache {
    fn lookup(&self, file_id: &str) -> Result<Option<CachedNote>, NotesError> {
        let (found, entries) = {
            let mut cache = self.locked()?;
            (cache.get(file_id).cloned(), cache.len())
        };
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        debug!(
            file_id,
            entries,
            hits = self.hits(),
            misses = self.misses(),
            hit_rate = self.hit_rate(),
            "memory cache lookup"
        );
        Ok(found)
    }

    fn store(&self, file_id: &str, content: &str, model: &str) -> Result<(), NotesError> {
        let note = CachedNote {
            file_id: file_id.to_string(),
            content: content.to_string(),
            model: model.to_string(),
            created_at: Utc::now(),
        };
        self.locked()?.put(file_id.to_string(), note);
        Ok(())
    }
}
