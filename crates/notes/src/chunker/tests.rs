//! Tests for the chunker.

use super::{chunk_text, normalize_text, Chunk};

/// `n` distinct words of exactly `len` characters each.
fn words(n: usize, len: usize) -> Vec<String> {
    (0..n).map(|i| format!("w{:0width$}", i, width = len - 1)).collect()
}

fn joined(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Edge cases ──────────────────────────────────────────────────────

#[test]
fn empty_text_yields_no_chunks() {
    assert!(chunk_text("", 100).is_empty());
}

#[test]
fn whitespace_only_yields_no_chunks() {
    assert!(chunk_text(" \n\n\t \r\n ", 100).is_empty());
}

#[test]
fn short_text_is_one_chunk() {
    let chunks = chunk_text("A short note.", 100);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "A short note.");
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[0].char_offset, 0);
}

#[test]
fn newlines_are_flattened() {
    let chunks = chunk_text("First paragraph.\n\nSecond\nparagraph.", 100);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "First paragraph. Second paragraph.");
}

#[test]
fn zero_max_size_is_treated_as_one() {
    let chunks = chunk_text("ab c", 0);
    let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["a", "b", "c"]);
}

// ── Splitting ───────────────────────────────────────────────────────

#[test]
fn six_hundred_chars_at_three_hundred_makes_two_chunks() {
    // 59 words of 9 chars + one of 10, single-spaced: exactly 600 chars.
    let mut ws = words(59, 9);
    ws.push("w999999999".to_string());
    let text = ws.join(" ");
    assert_eq!(text.chars().count(), 600);

    let chunks = chunk_text(&text, 300);
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.char_len() <= 300));
    assert_eq!(joined(&chunks), text);
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[1].index, 1);
}

#[test]
fn word_ending_exactly_at_limit_stays() {
    let chunks = chunk_text("aaaa bbbb cccc", 9);
    let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["aaaa bbbb", "cccc"]);
}

#[test]
fn never_splits_words_that_fit() {
    let text = words(200, 7).join(" ");
    let chunks = chunk_text(&text, 50);
    for chunk in &chunks {
        assert!(chunk.char_len() <= 50);
        for word in chunk.content.split(' ') {
            assert_eq!(word.len(), 7, "word was split: {word:?}");
        }
    }
}

#[test]
fn greedy_packing_is_minimal() {
    // Each word + separator is 10 chars; a 50-char chunk holds 5 words (49 chars).
    let text = words(23, 9).join(" ");
    let chunks = chunk_text(&text, 50);
    assert_eq!(chunks.len(), 5);
    assert_eq!(chunks[4].content.split(' ').count(), 3);
}

#[test]
fn oversized_word_after_full_chunk_starts_fresh() {
    // "tiny" plus a separator leaves no room in a 5-char chunk.
    let chunks = chunk_text("tiny abcdefghijkl end", 5);
    let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["tiny", "abcde", "fghij", "kl", "end"]);
    assert!(chunks.iter().all(|c| c.char_len() <= 5));
}

#[test]
fn oversized_word_fills_open_chunk_first() {
    let chunks = chunk_text("ab abcdefghijkl", 10);
    let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["ab abcdefg", "hijkl"]);
    assert_eq!(chunks[1].char_offset, 10);
}

#[test]
fn oversized_word_tail_accepts_following_words() {
    let chunks = chunk_text("tiny abcdefghijkl end", 8);
    let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["tiny abc", "defghijk", "l end"]);
    assert_eq!(joined(&chunks).replace(' ', ""), "tinyabcdefghijklend");
}

#[test]
fn limits_count_characters_not_bytes() {
    let text = "überprüfung naïve café résumé";
    let chunks = chunk_text(text, 11);
    assert!(chunks.iter().all(|c| c.char_len() <= 11));
    assert_eq!(chunks[0].content, "überprüfung");
    assert_eq!(joined(&chunks), text);
}

// ── Coverage ────────────────────────────────────────────────────────

#[test]
fn chunks_reconstruct_normalized_text() {
    let text = "Cells are the basic unit of life.\n\nThey   contain organelles,\tsuch as the\r\nnucleus and mitochondria. "
        .repeat(40);
    let normalized = normalize_text(&text);
    let chunks = chunk_text(&text, 120);
    assert!(chunks.len() > 1);
    assert_eq!(joined(&chunks), normalized);
}

#[test]
fn offsets_point_into_normalized_text() {
    let text = format!("{} oversizedwordthatmustbecut {}", words(30, 6).join("\n"), words(30, 4).join("  "));
    let normalized: Vec<char> = normalize_text(&text).chars().collect();
    let chunks = chunk_text(&text, 20);
    for chunk in &chunks {
        let start = chunk.char_offset;
        let slice: String = normalized[start..start + chunk.char_len()].iter().collect();
        assert_eq!(slice, chunk.content, "chunk {} offset mismatch", chunk.index);
    }
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
    }
}
