//! Configuration module for Viva.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{FeedbackPrompts, Prompts, QuizPrompts};
pub use settings::{
    GeneralSettings, ModelSettings, PromptSettings, QuizSettings, ServerSettings, Settings,
    TranscriptSettings,
};
