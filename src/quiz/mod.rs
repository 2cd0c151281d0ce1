//! Quiz generation and grading.
//!
//! Turns transcript text into conceptual questions and grades learner
//! answers, both through the generative-text backend.

mod feedback;
mod questions;

pub use feedback::FeedbackGenerator;
pub use questions::QuestionGenerator;

/// Truncate text to a character budget at a word boundary.
///
/// Prompt size is the only guard against oversized transcripts; the
/// backend enforces its own token limits on top of this.
pub(crate) fn truncate_at_word(text: &str, max_chars: usize) -> &str {
    if text.len() <= max_chars {
        return text;
    }

    let mut end = max_chars;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    let cut = text[..end].rfind(char::is_whitespace).unwrap_or(end);
    &text[..cut]
}
