//! Generative-text backend abstraction.
//!
//! The quiz pipeline talks to the language model through the [`Generator`]
//! trait so tests can substitute a canned backend.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for generative-text backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Run one completion with a system and user prompt.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
