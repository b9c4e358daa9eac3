//! Size-bounded chunking.
//!
//! Line breaks are flattened, whitespace runs collapse to a single space, and
//! words are packed greedily into chunks of at most `max_size` characters.
//! Chunk boundaries fall between words. A word that alone exceeds the limit
//! is cut at character boundaries: its first piece fills the rest of the open
//! chunk and the remainder continues in `max_size`-character pieces.

mod types;

pub use types::Chunk;

/// Collapse line breaks and whitespace runs into single spaces.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into ordered chunks of at most `max_size` characters.
///
/// Returns an empty vector for empty or whitespace-only input. A `max_size`
/// of zero is treated as one.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<Chunk> {
    let mut packer = Packer::new(max_size.max(1));
    for word in text.split_whitespace() {
        packer.push_word(word);
    }
    packer.finish()
}

/// Greedy word packer. `cursor` tracks the position in the normalized text.
struct Packer {
    max_size: usize,
    chunks: Vec<Chunk>,
    current: String,
    current_len: usize,
    current_start: usize,
    cursor: usize,
    words_seen: usize,
}

impl Packer {
    fn new(max_size: usize) -> Self {
        Self {
            max_size,
            chunks: Vec::new(),
            current: String::new(),
            current_len: 0,
            current_start: 0,
            cursor: 0,
            words_seen: 0,
        }
    }

    fn push_word(&mut self, word: &str) {
        let word_len = word.chars().count();
        let separator = usize::from(self.words_seen > 0);
        self.words_seen += 1;

        if self.current_len > 0 && self.current_len + 1 + word_len <= self.max_size {
            self.append(word, word_len);
            return;
        }

        if word_len <= self.max_size {
            self.flush();
            // The separating space is dropped at a chunk boundary.
            self.cursor += separator;
            self.start_with(word.to_string(), word_len);
            return;
        }

        // An oversized word first fills whatever room the open chunk has left.
        let chars: Vec<char> = word.chars().collect();
        let room = if self.current_len > 0 {
            self.max_size.saturating_sub(self.current_len + 1)
        } else {
            0
        };
        let rest = if room > 0 {
            let head: String = chars[..room].iter().collect();
            self.append(&head, room);
            &chars[room..]
        } else {
            &chars[..]
        };
        self.flush();
        if room == 0 {
            self.cursor += separator;
        }

        let mut pieces = rest.chunks(self.max_size).peekable();
        while let Some(piece) = pieces.next() {
            self.start_with(piece.iter().collect(), piece.len());
            if pieces.peek().is_some() {
                self.flush();
            }
        }
    }

    fn append(&mut self, word: &str, len: usize) {
        self.current.push(' ');
        self.current.push_str(word);
        self.current_len += 1 + len;
        self.cursor += 1 + len;
    }

    fn start_with(&mut self, content: String, len: usize) {
        self.current = content;
        self.current_len = len;
        self.current_start = self.cursor;
        self.cursor += len;
    }

    fn flush(&mut self) {
        if self.current_len == 0 {
            return;
        }
        self.chunks.push(Chunk {
            index: self.chunks.len(),
            content: std::mem::take(&mut self.current),
            char_offset: self.current_start,
        });
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

#[cfg(test)]
mod tests;
