//! Grade command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::engine::QuizEngine;
use anyhow::Result;

/// Run the grade command.
pub async fn run_grade(
    question: &str,
    answer: &str,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.model.name = model;
    }

    let engine = QuizEngine::new(settings)?;

    let spinner = Output::spinner("Grading answer...");

    match engine.grade(None, question, answer).await {
        Ok(feedback) => {
            spinner.finish_and_clear();
            println!("\n{}\n", feedback);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to grade answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
