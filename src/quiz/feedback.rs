//! Answer grading.

use super::truncate_at_word;
use crate::config::{Prompts, QuizSettings};
use crate::error::{Result, VivaError};
use crate::generation::Generator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Grades learner answers with constructive prose feedback.
pub struct FeedbackGenerator {
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    max_context_chars: usize,
}

impl FeedbackGenerator {
    /// Create a feedback generator.
    pub fn new(generator: Arc<dyn Generator>, prompts: Prompts, settings: &QuizSettings) -> Self {
        Self {
            generator,
            prompts,
            max_context_chars: settings.max_transcript_chars,
        }
    }

    /// Grade an answer against a question, optionally with lecture
    /// material as reference context.
    ///
    /// Feedback is opaque prose; no score is extracted.
    #[instrument(skip(self, reference_context, answer))]
    pub async fn grade(
        &self,
        question: &str,
        reference_context: Option<&str>,
        answer: &str,
    ) -> Result<String> {
        if question.trim().is_empty() {
            return Err(VivaError::InvalidInput("Question is empty".to_string()));
        }
        if answer.trim().is_empty() {
            return Err(VivaError::InvalidInput("Answer is empty".to_string()));
        }

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("answer".to_string(), answer.to_string());
        vars.insert(
            "context".to_string(),
            reference_context
                .map(|c| truncate_at_word(c, self.max_context_chars).to_string())
                .unwrap_or_default(),
        );

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.feedback.user, &vars);

        let feedback = self
            .generator
            .complete(&self.prompts.feedback.system, &user_prompt)
            .await?;

        let feedback = feedback.trim().to_string();
        if feedback.is_empty() {
            return Err(VivaError::GenerationFailed(
                "Backend returned empty feedback".to_string(),
            ));
        }

        info!("Generated feedback ({} characters)", feedback.len());

        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedGenerator {
        completion: String,
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.completion.clone())
        }
    }

    fn generator(completion: &str) -> FeedbackGenerator {
        FeedbackGenerator::new(
            Arc::new(CannedGenerator {
                completion: completion.to_string(),
            }),
            Prompts::default(),
            &QuizSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_blank_completion_is_generation_failed() {
        // A backend that produces nothing must never become an empty success
        for blank in ["", "   ", "\n\n\t"] {
            let err = generator(blank)
                .grade("What is inertia?", None, "Resistance to change.")
                .await
                .unwrap_err();
            assert!(matches!(err, VivaError::GenerationFailed(_)));
        }
    }

    #[tokio::test]
    async fn test_feedback_is_trimmed_prose() {
        let feedback = generator("\nYour answer captures the core idea of inertia.\n")
            .grade("What is inertia?", None, "Resistance to change.")
            .await
            .unwrap();
        assert_eq!(
            feedback,
            "Your answer captures the core idea of inertia."
        );
    }
}
