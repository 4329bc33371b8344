//! Error types for Mail Triage.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-facing validation errors. Reported as 400s, never retried.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Texto do email é muito curto para análise. Mínimo {min} caracteres.")]
    TooShort { length: usize, min: usize },

    #[error("Por favor, insira o texto do email.")]
    Empty,

    #[error("Formato de arquivo não suportado. Use PDF ou TXT.")]
    UnsupportedFileType { extension: String },
}

/// Document text extraction errors. Surfaced as a generic message;
/// no partial-text recovery is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Não foi possível extrair texto do arquivo PDF")]
    Pdf(String),

    #[error("Não foi possível ler o arquivo de texto")]
    TxtDecode(String),
}

/// Oracle (LLM provider) errors. Never surfaced to the caller — every
/// variant degrades to the heuristic fallback path.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} timed out after {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },

    #[error("Empty response from provider {provider}")]
    EmptyResponse { provider: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
