//! Viva - YouTube Lecture Quizzes
//!
//! Turn a YouTube lecture into an interactive quiz. Viva fetches the
//! video's captions, asks a language model for conceptual questions,
//! and grades learner answers with constructive feedback.
//!
//! The name comes from "viva voce," the oral examination.
//!
//! # Overview
//!
//! Viva allows you to:
//! - Generate quiz questions from any publicly captioned YouTube video
//! - Answer questions interactively and get AI-graded feedback
//! - Serve the pipeline as an HTTP API for a web UI
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `transcript` - Caption retrieval abstraction (YouTube)
//! - `generation` - Generative-text backend abstraction (OpenAI)
//! - `quiz` - Question generation and answer grading
//! - `session` - Keyed in-memory quiz sessions
//! - `engine` - Pipeline coordination
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use viva::config::Settings;
//! use viva::engine::QuizEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let engine = QuizEngine::new(settings)?;
//!
//!     // Generate a quiz from a YouTube video
//!     let quiz = engine.create_quiz("dQw4w9WgXcQ", None, None).await?;
//!     for question in &quiz.questions {
//!         println!("{}", question);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod openai;
pub mod quiz;
pub mod server;
pub mod session;
pub mod transcript;

pub use error::{Result, VivaError};
