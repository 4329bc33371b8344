//! Mail Triage — LLM-backed email classification with a deterministic fallback.

pub mod cache;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod limiter;
pub mod llm;
pub mod server;
