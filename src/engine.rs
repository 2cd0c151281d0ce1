//! Quiz pipeline orchestrator.
//!
//! Coordinates transcript retrieval, question generation, session storage,
//! and answer grading.

use crate::config::{Prompts, Settings};
use crate::error::{Result, VivaError};
use crate::generation::{Generator, OpenAIGenerator};
use crate::quiz::{FeedbackGenerator, QuestionGenerator};
use crate::session::{QuizSession, SessionStore};
use crate::transcript::{extract_video_id, TranscriptSource, YoutubeTranscriptSource};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Result of a successful quiz generation.
#[derive(Debug, Clone)]
pub struct CreatedQuiz {
    /// Session the question set was stored under.
    pub session_id: String,
    /// Video the questions were generated from.
    pub video_id: String,
    /// Generated questions in order.
    pub questions: Vec<String>,
}

/// The main orchestrator for the quiz pipeline.
pub struct QuizEngine {
    settings: Settings,
    transcripts: Arc<dyn TranscriptSource>,
    question_generator: QuestionGenerator,
    feedback_generator: FeedbackGenerator,
    store: SessionStore,
}

impl QuizEngine {
    /// Create an engine with default components.
    pub fn new(settings: Settings) -> Result<Self> {
        // Load prompts (with optional custom directory and variables)
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts: Arc<dyn TranscriptSource> =
            Arc::new(YoutubeTranscriptSource::new(&settings.transcript.language)?);

        let generator: Arc<dyn Generator> =
            Arc::new(OpenAIGenerator::with_config(&settings.model));

        Ok(Self::with_components(
            settings, prompts, transcripts, generator,
        ))
    }

    /// Create an engine with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptSource>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        let question_generator =
            QuestionGenerator::new(generator.clone(), prompts.clone(), &settings.quiz);
        let feedback_generator =
            FeedbackGenerator::new(generator, prompts, &settings.quiz);

        Self {
            settings,
            transcripts,
            question_generator,
            feedback_generator,
            store: SessionStore::new(),
        }
    }

    /// Generate a quiz from a video URL or id and store it under a session.
    ///
    /// A missing session id gets a fresh UUID. Any failure leaves the
    /// store untouched; no partial question set is ever written.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn create_quiz(
        &self,
        input: &str,
        count: Option<usize>,
        session_id: Option<String>,
    ) -> Result<CreatedQuiz> {
        let video_id = extract_video_id(input).ok_or_else(|| {
            VivaError::InvalidInput(format!("Invalid YouTube video ID or URL: {}", input))
        })?;

        let transcript = self.transcripts.fetch(&video_id).await?;
        let text = transcript.full_text();

        info!(
            "Fetched transcript for {} ({} characters, {} segments)",
            video_id,
            text.len(),
            transcript.segments.len()
        );

        let count = count.unwrap_or(self.settings.quiz.question_count);
        let questions = self.question_generator.generate(&text, count).await?;

        let session_id = session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.store.put(
            &session_id,
            QuizSession::new(video_id.clone(), questions.clone(), text),
        );

        Ok(CreatedQuiz {
            session_id,
            video_id,
            questions,
        })
    }

    /// Return the stored question set for a session.
    pub fn questions(&self, session_id: &str) -> Result<QuizSession> {
        self.store.get(session_id)
    }

    /// Grade a learner's answer to a question.
    ///
    /// A known session contributes its transcript as reference context;
    /// without one the answer is graded on the question alone.
    #[instrument(skip(self, question, answer))]
    pub async fn grade(
        &self,
        session_id: Option<&str>,
        question: &str,
        answer: &str,
    ) -> Result<String> {
        let context = session_id
            .and_then(|id| self.store.get(id).ok())
            .map(|s| s.transcript);

        self.feedback_generator
            .grade(question, context.as_deref(), answer)
            .await
    }
}
