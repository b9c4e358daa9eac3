use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{CachedNote, NoteCache};
use crate::error::NotesError;

/// Directory of JSON files, one per file identifier.
///
/// File names are the SHA-256 of the identifier, so identifiers containing
/// path separators or other awkward characters are safe.
pub struct FileNoteCache {
    dir: PathBuf,
}

impl FileNoteCache {
    /// Open (and create if needed) a cache rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, NotesError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, file_id: &str) -> PathBuf {
        let digest = Sha256::digest(file_id.as_bytes());
        self.dir.join(format!("{digest:x}.json"))
    }
}

impl NoteCache for FileNoteCache {
    fn lookup(&self, file_id: &str) -> Result<Option<CachedNote>, NotesError> {
        let path = self.entry_path(file_id);
        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let note: CachedNote = serde_json::from_slice(&raw).map_err(|e| {
            NotesError::Cache(format!("corrupt cache entry {}: {e}", path.display()))
        })?;
        Ok(Some(note))
    }

    fn store(&self, file_id: &str, content: &str, model: &str) -> Result<(), NotesError> {
        let note = CachedNote {
            file_id: file_id.to_string(),
            content: content.to_string(),
            model: model.to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&note)
            .map_err(|e| NotesError::Cache(format!("failed to encode notes: {e}")))?;

        // Per-writer temp file, renamed into place. Dropped on failure.
        let path = self.entry_path(file_id);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(file_id, path = %path.display(), "notes cached");
        Ok(())
    }
}
