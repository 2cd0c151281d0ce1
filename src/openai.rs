//! OpenAI client configuration.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Timeout for OpenAI API requests (2 minutes).
///
/// Question generation over a long transcript can take a while, but a
/// hung call should not hold a quiz request open indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Create an OpenAI client with a request timeout.
///
/// The API credential is read from `OPENAI_API_KEY`.
pub fn create_client() -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
