//! Oracle (LLM) integration.
//!
//! Uses the rig-core crate for HTTP transport and the `RigAdapter` to bridge
//! rig's `CompletionModel` trait to our `LlmProvider` trait. Production runs
//! against Gemini; tests stub `LlmProvider` directly.

pub mod provider;
mod rig_adapter;

pub use provider::LlmProvider;
pub use rig_adapter::RigAdapter;

use std::sync::Arc;
use std::time::Duration;

use rig::client::CompletionClient;
use secrecy::ExposeSecret;

use crate::config::AppConfig;
use crate::error::LlmError;

/// Create the Gemini-backed provider from configuration.
pub fn create_provider(config: &AppConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    create_gemini_provider(config.api_key.expose_secret(), &config.model, config.llm_timeout)
}

fn create_gemini_provider(
    api_key: &str,
    model: &str,
    timeout: Duration,
) -> Result<Arc<dyn LlmProvider>, LlmError> {
    use rig::providers::gemini;

    let client: rig::client::Client<gemini::client::GeminiExt> = gemini::Client::new(api_key)
        .map_err(|e| LlmError::RequestFailed {
            provider: "gemini".to_string(),
            reason: format!("Failed to create Gemini client: {}", e),
        })?;

    let completion_model = client.completion_model(model);
    tracing::info!("Using Gemini (model: {})", model);
    Ok(Arc::new(RigAdapter::new(completion_model, model, timeout)))
}
