//! Serve command implementation.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::engine::QuizEngine;
use crate::server::{app, AppState};
use anyhow::Result;
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check_api_key() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let engine = QuizEngine::new(settings)?;
    let state = Arc::new(AppState { engine });

    let router = app(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Viva API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Generate Quiz", "POST /quiz");
    Output::kv("Get Questions", "GET  /quiz/:session_id");
    Output::kv("Grade Answer", "POST /feedback");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router).await?;

    Ok(())
}
