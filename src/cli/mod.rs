//! CLI module for Viva.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Viva - YouTube Lecture Quizzes
///
/// Turn a YouTube lecture into an interactive quiz: generate conceptual
/// questions from the captions and get AI feedback on your answers.
/// The name comes from "viva voce," the oral examination.
#[derive(Parser, Debug)]
#[command(name = "viva")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a quiz from a YouTube lecture
    Quiz {
        /// YouTube URL or video ID
        input: String,

        /// Number of questions to generate
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Answer each question on stdin and get graded feedback
        #[arg(short, long)]
        interactive: bool,
    },

    /// Grade an answer to a single question
    Grade {
        /// The question being answered
        question: String,

        /// The learner's answer
        answer: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start the HTTP API server for UI integration
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
