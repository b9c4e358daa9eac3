//! Chunk output type.

/// A slice of normalized document text handed to the model on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// Character offset of `content` in the normalized document text.
    pub char_offset: usize,
}

impl Chunk {
    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
