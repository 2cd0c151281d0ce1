//! HTTP API for the quiz pipeline.
//!
//! Exposes quiz generation, question retrieval, answer grading, and a
//! health check over REST for the presentation layer.

use crate::engine::QuizEngine;
use crate::error::VivaError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
pub struct AppState {
    pub engine: QuizEngine,
}

/// Build the API router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/quiz", post(create_quiz))
        .route("/quiz/{session_id}", get(get_quiz))
        .route("/feedback", post(feedback))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QuizRequest {
    /// YouTube URL or video ID
    url: String,
    /// Number of questions to generate (config default if omitted)
    #[serde(default)]
    count: Option<usize>,
    /// Session to store the quiz under (a fresh one is minted if omitted)
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct QuizResponse {
    session_id: String,
    video_id: String,
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    question: String,
    answer: String,
    /// Session whose transcript serves as grading context
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct FeedbackResponse {
    feedback: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Map error kinds to HTTP statuses.
fn status_for(err: &VivaError) -> StatusCode {
    match err {
        VivaError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        VivaError::NoQuestionsAvailable(_) => StatusCode::NOT_FOUND,
        VivaError::TranscriptUnavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &VivaError) -> (StatusCode, Json<ErrorResponse>) {
    (
        status_for(err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// === Handlers ===

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuizRequest>,
) -> impl IntoResponse {
    match state
        .engine
        .create_quiz(&req.url, req.count, req.session_id)
        .await
    {
        Ok(created) => Json(QuizResponse {
            session_id: created.session_id,
            video_id: created.video_id,
            questions: created.questions,
        })
        .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.engine.questions(&session_id) {
        Ok(session) => Json(QuizResponse {
            session_id,
            video_id: session.video_id,
            questions: session.questions,
        })
        .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeedbackRequest>,
) -> impl IntoResponse {
    match state
        .engine
        .grade(req.session_id.as_deref(), &req.question, &req.answer)
        .await
    {
        Ok(feedback) => Json(FeedbackResponse { feedback }).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Prompts, Settings};
    use crate::error::Result;
    use crate::generation::Generator;
    use crate::transcript::{Transcript, TranscriptSource};
    use async_trait::async_trait;

    struct UnreachableTranscriptSource;

    #[async_trait]
    impl TranscriptSource for UnreachableTranscriptSource {
        async fn fetch(&self, _video_id: &str) -> Result<Transcript> {
            Err(VivaError::TranscriptUnavailable(
                "upstream unreachable".to_string(),
            ))
        }
    }

    struct UnreachableGenerator;

    #[async_trait]
    impl Generator for UnreachableGenerator {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Err(VivaError::GenerationFailed("backend unreachable".to_string()))
        }
    }

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            engine: QuizEngine::with_components(
                Settings::default(),
                Prompts::default(),
                Arc::new(UnreachableTranscriptSource),
                Arc::new(UnreachableGenerator),
            ),
        })
    }

    #[tokio::test]
    async fn test_health_always_ok() {
        // Health does not touch the engine; it succeeds even when both
        // backends are unreachable and no quiz has been generated.
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_router_builds_with_engine_state() {
        let _router = app(state());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&VivaError::InvalidInput("bad url".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&VivaError::NoQuestionsAvailable("empty".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&VivaError::TranscriptUnavailable("no captions".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&VivaError::GenerationFailed("backend down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message_surfaces_verbatim() {
        let err = VivaError::TranscriptUnavailable("Captions are disabled for video x".into());
        let (_, Json(body)) = error_response(&err);
        assert_eq!(
            body.error,
            "Transcript unavailable: Captions are disabled for video x"
        );
    }
}
