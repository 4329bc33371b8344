//! Adapter bridging rig's `CompletionModel` to our `LlmProvider` trait.

use std::time::Duration;

use async_trait::async_trait;
use rig::agent::{Agent, AgentBuilder};
use rig::completion::{CompletionModel, Prompt};

use crate::error::LlmError;
use crate::llm::provider::LlmProvider;

/// Wraps a rig completion model behind the `LlmProvider` seam, applying a
/// bounded per-request timeout so a slow oracle can never stall a handler.
pub struct RigAdapter<M: CompletionModel> {
    agent: Agent<M>,
    model_name: String,
    timeout: Duration,
}

impl<M: CompletionModel> RigAdapter<M> {
    pub fn new(model: M, model_name: &str, timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new(model).build(),
            model_name: model_name.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl<M: CompletionModel> LlmProvider for RigAdapter<M> {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = tokio::time::timeout(self.timeout, self.agent.prompt(prompt))
            .await
            .map_err(|_| LlmError::Timeout {
                provider: "gemini".to_string(),
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| LlmError::RequestFailed {
                provider: "gemini".to_string(),
                reason: e.to_string(),
            })?;

        let trimmed = response.trim();
        if trimmed.is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: "gemini".to_string(),
            });
        }
        Ok(trimmed.to_string())
    }
}
