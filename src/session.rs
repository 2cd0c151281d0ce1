//! In-memory quiz session store.
//!
//! Sessions are keyed by id so concurrent learners never overwrite each
//! other's question sets. State lives only for the process lifetime.

use crate::error::{Result, VivaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// The question set and source material for one learner session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    /// Video the questions were generated from.
    pub video_id: String,
    /// Generated questions in order.
    pub questions: Vec<String>,
    /// Transcript text, kept as grading reference context.
    pub transcript: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl QuizSession {
    /// Create a session stamped with the current time.
    pub fn new(video_id: String, questions: Vec<String>, transcript: String) -> Self {
        Self {
            video_id,
            questions,
            transcript,
            created_at: Utc::now(),
        }
    }
}

/// Keyed in-memory session store.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, QuizSession>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session, replacing any previous value under the same id.
    pub fn put(&self, session_id: &str, session: QuizSession) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session_id.to_string(), session);
    }

    /// Retrieve a session by id.
    pub fn get(&self, session_id: &str) -> Result<QuizSession> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned().ok_or_else(|| {
            VivaError::NoQuestionsAvailable(format!(
                "No quiz has been generated for session {}",
                session_id
            ))
        })
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn session(video_id: &str) -> QuizSession {
        QuizSession::new(
            video_id.to_string(),
            vec!["What is inertia?".to_string()],
            "Newton's first law.".to_string(),
        )
    }

    #[test]
    fn test_get_before_put_fails() {
        let store = SessionStore::new();
        let err = store.get("missing").unwrap_err();
        assert!(matches!(err, VivaError::NoQuestionsAvailable(_)));
    }

    #[test]
    fn test_read_after_write() {
        let store = SessionStore::new();
        store.put("s1", session("abc123xyz00"));

        let got = store.get("s1").unwrap();
        assert_eq!(got.video_id, "abc123xyz00");
        assert_eq!(got.questions, vec!["What is inertia?"]);
    }

    #[test]
    fn test_last_write_wins_within_key() {
        let store = SessionStore::new();
        store.put("s1", session("first000000"));
        store.put("s1", session("second00000"));

        assert_eq!(store.get("s1").unwrap().video_id, "second00000");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store.put("alice", session("video_a0000"));
        store.put("bob", session("video_b0000"));

        assert_eq!(store.get("alice").unwrap().video_id, "video_a0000");
        assert_eq!(store.get("bob").unwrap().video_id, "video_b0000");
    }

    #[tokio::test]
    async fn test_concurrent_writes_never_corrupt() {
        let store = Arc::new(SessionStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("session-{}", i % 4);
                store.put(&id, session("vid00000000"));
                // Whole-value replacement: a read sees a complete session
                if let Ok(s) = store.get(&id) {
                    assert_eq!(s.questions.len(), 1);
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 4);
    }
}
