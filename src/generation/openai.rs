//! OpenAI chat-completions backend.

use super::Generator;
use crate::config::ModelSettings;
use crate::error::{Result, VivaError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-backed text generator.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIGenerator {
    /// Create a generator with default model settings.
    pub fn new() -> Self {
        Self::with_config(&ModelSettings::default())
    }

    /// Create a generator from model settings.
    pub fn with_config(settings: &ModelSettings) -> Self {
        Self {
            client: create_client(),
            model: settings.name.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

impl Default for OpenAIGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, system, user))]
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| VivaError::GenerationFailed(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| VivaError::GenerationFailed(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| VivaError::GenerationFailed(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            VivaError::GenerationFailed(format!("OpenAI API error: {}", e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| VivaError::GenerationFailed("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated {} characters", content.len());

        Ok(content)
    }
}
