//! Provider trait — the seam between the classifier and the oracle.

use async_trait::async_trait;

use crate::error::LlmError;

/// An opaque, possibly-failing, possibly-slow text-generation service.
///
/// A single attempt per call: implementations do not retry, and the caller
/// treats every error as a signal to take the heuristic fallback path.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, for logging and the health endpoint.
    fn model_name(&self) -> &str;

    /// Send a prompt and return the trimmed response text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
