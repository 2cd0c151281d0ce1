//! Quiz command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::engine::QuizEngine;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the quiz command.
pub async fn run_quiz(
    input: &str,
    count: Option<usize>,
    model: Option<String>,
    interactive: bool,
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

    let spinner = Output::spinner("Fetching transcript and generating questions...");

    let created = match engine.create_quiz(input, count, None).await {
        Ok(created) => {
            spinner.finish_and_clear();
            created
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate quiz: {}", e));
            return Err(e.into());
        }
    };

    Output::header(&format!("Quiz for {}", created.video_id));

    if !interactive {
        for (i, question) in created.questions.iter().enumerate() {
            Output::question(i + 1, question);
        }
        println!();
        Output::info("Answer a question with: viva grade \"<question>\" \"<your answer>\"");
        return Ok(());
    }

    // Interactive mode: answer each question on stdin, grade as we go
    println!(
        "\n{}\n",
        style("Answer each question, or press Enter to skip. Type 'exit' to stop.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for (i, question) in created.questions.iter().enumerate() {
        Output::question(i + 1, question);

        print!("{} ", style("Your answer:").green().bold());
        stdout.flush()?;

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;
        let answer = answer.trim();

        if answer.eq_ignore_ascii_case("exit") {
            break;
        }

        if answer.is_empty() {
            Output::info("Skipped.");
            continue;
        }

        let spinner = Output::spinner("Grading...");
        match engine
            .grade(Some(&created.session_id), question, answer)
            .await
        {
            Ok(feedback) => {
                spinner.finish_and_clear();
                println!("\n{}\n", feedback);
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::error(&format!("Failed to grade answer: {}", e));
            }
        }
    }

    Output::success("Quiz complete.");

    Ok(())
}
