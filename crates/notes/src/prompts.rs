//! Prompt templates for the notes pipeline.
//!
//! Source text is interpolated verbatim. The model service is treated as a
//! plain string-in/string-out transform, so nothing is escaped.

/// System instruction sent with every prompt.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates clear, structured study notes.";

/// Notes for a document short enough to send whole.
pub fn direct_notes_prompt(text: &str) -> String {
    format!(
        "Create well-structured study notes from the following text.

Requirements:
- Start with a short overview paragraph
- Then provide 3-5 concise bullet-point notes
- Use clear, student-friendly language

Text:
{text}
"
    )
}

/// Summary of a single chunk (the map step).
pub fn chunk_summary_prompt(chunk: &str) -> String {
    format!(
        "Summarize the following text clearly and concisely.
Focus on key insights, main arguments, and core ideas.

Text:
{chunk}
"
    )
}

/// Final notes from the joined chunk summaries (the reduce step).
pub fn reduce_prompt(combined_summary: &str) -> String {
    format!(
        "Combine the following summaries into well-structured study notes.

Requirements:
- Start with a short overview paragraph
- Then provide 5-8 concise bullet-point notes
- Use clear, student-friendly language

Summaries:
{combined_summary}
"
    )
}
