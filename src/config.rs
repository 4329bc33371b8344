//! Service configuration, built from environment variables.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Gemini model — the cheap tier, this runs on every request.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Minimum accepted input length after trimming.
pub const MIN_TEXT_LENGTH: usize = 11;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key.
    pub api_key: SecretString,
    /// Model identifier passed to the provider.
    pub model: String,
    /// HTTP listen port.
    pub port: u16,
    /// Maximum oracle calls admitted per window.
    pub rate_max_requests: usize,
    /// Rate-limiter window.
    pub rate_window: Duration,
    /// LRU cache capacity (entries), shared default for both caches.
    pub cache_capacity: usize,
    /// Per-request oracle timeout.
    pub llm_timeout: Duration,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = std::env::var("MAIL_TRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let port: u16 = std::env::var("MAIL_TRIAGE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let rate_max_requests: usize = std::env::var("MAIL_TRIAGE_RATE_MAX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        if rate_max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAIL_TRIAGE_RATE_MAX".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        let rate_window_secs: u64 = std::env::var("MAIL_TRIAGE_RATE_WINDOW_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        let cache_capacity: usize = std::env::var("MAIL_TRIAGE_CACHE_CAP")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        let llm_timeout_secs: u64 = std::env::var("MAIL_TRIAGE_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            port,
            rate_max_requests,
            rate_window: Duration::from_secs(rate_window_secs),
            cache_capacity,
            llm_timeout: Duration::from_secs(llm_timeout_secs),
        })
    }
}
