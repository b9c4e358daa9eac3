//! Text extraction from uploaded files.
//!
//! The pipeline only ever sees plain text; this module is the boundary that
//! turns stored bytes into that text.

mod txt;

use crate::error::NotesError;

/// Turns stored file bytes into the document text fed to the pipeline.
pub trait TextExtractor: Send + Sync {
    /// Fails with `UnsupportedFormat` or `NoReadableText`.
    fn extract(&self, bytes: &[u8], filename: &str) -> Result<String, NotesError>;
}

/// Extractor for text-based formats (`.txt`, `.text`, `.md`, `.markdown`).
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], filename: &str) -> Result<String, NotesError> {
        let ext = file_extension(filename);

        let text = match ext.as_str() {
            "txt" | "text" | "md" | "markdown" => txt::extract_txt(bytes),
            other => return Err(NotesError::UnsupportedFormat(other.to_string())),
        };

        if text.trim().is_empty() {
            return Err(NotesError::NoReadableText);
        }
        Ok(text)
    }
}

/// Lowercased extension, or an empty string when the name has none.
fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}
