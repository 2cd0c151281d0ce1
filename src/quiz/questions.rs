//! Question generation from transcript text.

use super::truncate_at_word;
use crate::config::{Prompts, QuizSettings};
use crate::error::{Result, VivaError};
use crate::generation::Generator;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Generates conceptual quiz questions from a lecture transcript.
pub struct QuestionGenerator {
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    max_transcript_chars: usize,
}

impl QuestionGenerator {
    /// Create a question generator.
    pub fn new(generator: Arc<dyn Generator>, prompts: Prompts, settings: &QuizSettings) -> Self {
        Self {
            generator,
            prompts,
            max_transcript_chars: settings.max_transcript_chars,
        }
    }

    /// Generate an ordered list of questions from transcript text.
    ///
    /// The backend is asked for `count` questions but the returned list is
    /// whatever parses; the backend does not always comply exactly.
    #[instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    pub async fn generate(&self, transcript: &str, count: usize) -> Result<Vec<String>> {
        if transcript.trim().is_empty() {
            return Err(VivaError::InvalidInput(
                "Transcript is empty".to_string(),
            ));
        }

        let excerpt = truncate_at_word(transcript, self.max_transcript_chars);

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), excerpt.to_string());
        vars.insert("count".to_string(), count.to_string());

        let user_prompt = self.prompts.render_with_custom(&self.prompts.quiz.user, &vars);

        let completion = self
            .generator
            .complete(&self.prompts.quiz.system, &user_prompt)
            .await?;

        let questions = parse_questions(&completion)?;

        info!("Generated {} questions", questions.len());

        Ok(questions)
    }
}

/// Parse a numbered-list completion into individual questions.
///
/// The prompt demands `1. ...` lines; `1)` prefixes and leading preamble
/// are tolerated, and unnumbered lines continue the previous question.
/// Anything that yields no questions is a generation failure.
pub fn parse_questions(completion: &str) -> Result<Vec<String>> {
    let number_prefix = Regex::new(r"^\s*\d+\s*[.)]\s*").expect("Invalid regex");

    let mut questions: Vec<String> = Vec::new();

    for line in completion.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(m) = number_prefix.find(trimmed) {
            let body = trimmed[m.end()..].trim();
            if !body.is_empty() {
                questions.push(body.to_string());
            }
        } else if let Some(last) = questions.last_mut() {
            // Continuation of a multi-line question
            last.push(' ');
            last.push_str(trimmed);
        }
        // Lines before the first numbered entry are preamble; skip them.
    }

    if questions.is_empty() {
        debug!("Unparsable completion: {:?}", completion);
        return Err(VivaError::GenerationFailed(
            "Backend response contained no parsable questions".to_string(),
        ));
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_list() {
        let completion = "1. What is inertia?\n2. How does mass relate to acceleration?\n3. Why do objects resist changes in motion?";
        let questions = parse_questions(completion).unwrap();
        assert_eq!(
            questions,
            vec![
                "What is inertia?",
                "How does mass relate to acceleration?",
                "Why do objects resist changes in motion?"
            ]
        );
    }

    #[test]
    fn test_parse_paren_numbering_and_blank_lines() {
        let completion = "1) First question?\n\n2) Second question?\n\n3) Third question?";
        let questions = parse_questions(completion).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], "First question?");
    }

    #[test]
    fn test_parse_skips_preamble() {
        let completion =
            "Here are five questions about the lecture:\n\n1. What does Newton's first law state?\n2. What is a force?";
        let questions = parse_questions(completion).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0], "What does Newton's first law state?");
    }

    #[test]
    fn test_parse_multiline_question() {
        let completion = "1. If the net force on an object were doubled,\nhow would its acceleration change?\n2. What is momentum?";
        let questions = parse_questions(completion).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(
            questions[0],
            "If the net force on an object were doubled, how would its acceleration change?"
        );
    }

    #[test]
    fn test_parse_unparsable_is_error() {
        let err = parse_questions("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, VivaError::GenerationFailed(_)));

        let err = parse_questions("").unwrap_err();
        assert!(matches!(err, VivaError::GenerationFailed(_)));
    }

    #[test]
    fn test_parse_empty_numbered_entries_dropped() {
        let questions = parse_questions("1.\n2. A real question?").unwrap();
        assert_eq!(questions, vec!["A real question?"]);
    }
}
