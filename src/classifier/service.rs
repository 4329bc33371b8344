//! The rate-limited, cache-wrapped oracle classifier.
//!
//! Flow per request: cache lookup → on miss, rate-limiter admission check →
//! on admit, oracle call → on denial or any oracle failure, keyword fallback.
//! Only oracle-sourced results are cached; a fallback answer computed under
//! denial or failure is recomputed next time so it can never shadow a later
//! admitted oracle answer for the same text.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::classifier::keywords::{fallback_category, fallback_reply};
use crate::classifier::{Category, parse_oracle_category};
use crate::config::AppConfig;
use crate::limiter::RateLimiter;
use crate::llm::LlmProvider;

/// Prompt input is truncated to this many characters to bound cost/latency.
const PROMPT_PREFIX_CHARS: usize = 1000;

/// Where a triage answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// Served from the memoization cache (originally oracle-computed).
    Cache,
    /// Freshly computed by the oracle.
    Oracle,
    /// Local keyword heuristic (rate-limit denial or oracle failure).
    Fallback,
}

/// Result of a full triage pass: category plus generated reply.
#[derive(Debug, Clone)]
pub struct TriageResult {
    pub category: Category,
    pub reply: String,
    pub category_source: ClassificationSource,
    pub reply_source: ClassificationSource,
}

/// Classifies emails and generates replies, guarding every oracle call with
/// a shared rate limiter and memoizing oracle answers in bounded LRU caches.
///
/// All dependencies are injected; tests construct a fresh instance per case.
pub struct EmailClassifier {
    llm: Arc<dyn LlmProvider>,
    limiter: Mutex<RateLimiter>,
    category_cache: Mutex<ResultCache<String, Category>>,
    reply_cache: Mutex<ResultCache<(Category, String), String>>,
}

impl EmailClassifier {
    /// Create a classifier with explicit limiter and cache parameters.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        max_requests: usize,
        time_window: Duration,
        cache_capacity: usize,
    ) -> Self {
        Self {
            llm,
            limiter: Mutex::new(RateLimiter::new(max_requests, time_window)),
            category_cache: Mutex::new(ResultCache::new(cache_capacity)),
            reply_cache: Mutex::new(ResultCache::new(cache_capacity)),
        }
    }

    /// Create a classifier from service configuration.
    pub fn from_config(llm: Arc<dyn LlmProvider>, config: &AppConfig) -> Self {
        Self::new(
            llm,
            config.rate_max_requests,
            config.rate_window,
            config.cache_capacity,
        )
    }

    /// Model identifier of the underlying provider.
    pub fn model_name(&self) -> String {
        self.llm.model_name().to_string()
    }

    /// Probe the oracle with a tiny prompt (health endpoint).
    pub async fn probe_oracle(&self) -> Result<(), crate::error::LlmError> {
        self.llm.generate("Teste de conexão").await.map(|_| ())
    }

    /// Classify an email and generate a reply for it.
    pub async fn triage(&self, text: &str) -> TriageResult {
        let (category, category_source) = self.classify(text).await;
        let (reply, reply_source) = self.generate_reply(category, text).await;
        TriageResult {
            category,
            reply,
            category_source,
            reply_source,
        }
    }

    /// Classify an email text. Never errors: every failure mode degrades to
    /// the deterministic keyword heuristic.
    pub async fn classify(&self, text: &str) -> (Category, ClassificationSource) {
        {
            let mut cache = self.category_cache.lock().await;
            if let Some(category) = cache.get(&text.to_string()) {
                debug!(len = text.len(), %category, "Classification served from cache");
                return (category, ClassificationSource::Cache);
            }
        }

        if !self.limiter.lock().await.allow_request() {
            debug!(len = text.len(), "Rate limiter denied oracle call, using fallback");
            return (fallback_category(text), ClassificationSource::Fallback);
        }

        let prompt = build_classification_prompt(text);
        match self.llm.generate(&prompt).await {
            Ok(raw) => match parse_oracle_category(&raw) {
                Some(category) => {
                    self.category_cache
                        .lock()
                        .await
                        .insert(text.to_string(), category);
                    debug!(%category, "Oracle classification");
                    (category, ClassificationSource::Oracle)
                }
                None => {
                    warn!(raw = %raw.chars().take(120).collect::<String>(),
                          "Unparseable oracle answer, using fallback");
                    (fallback_category(text), ClassificationSource::Fallback)
                }
            },
            Err(e) => {
                warn!(error = %e, "Oracle call failed, using fallback");
                (fallback_category(text), ClassificationSource::Fallback)
            }
        }
    }

    /// Generate a reply for an email in the given category. Same guarded,
    /// memoized shape as classification, but the oracle's trimmed text is
    /// accepted verbatim.
    pub async fn generate_reply(
        &self,
        category: Category,
        text: &str,
    ) -> (String, ClassificationSource) {
        let key = (category, text.to_string());
        {
            let mut cache = self.reply_cache.lock().await;
            if let Some(reply) = cache.get(&key) {
                debug!(%category, "Reply served from cache");
                return (reply, ClassificationSource::Cache);
            }
        }

        if !self.limiter.lock().await.allow_request() {
            debug!(%category, "Rate limiter denied oracle call, using canned reply");
            return (fallback_reply(category, text), ClassificationSource::Fallback);
        }

        let prompt = build_reply_prompt(category, text);
        match self.llm.generate(&prompt).await {
            Ok(reply) => {
                self.reply_cache.lock().await.insert(key, reply.clone());
                (reply, ClassificationSource::Oracle)
            }
            Err(e) => {
                warn!(error = %e, "Oracle reply failed, using canned reply");
                (fallback_reply(category, text), ClassificationSource::Fallback)
            }
        }
    }
}

// ── Prompt construction ─────────────────────────────────────────────

fn truncate_input(text: &str) -> String {
    text.chars().take(PROMPT_PREFIX_CHARS).collect()
}

/// Classification prompt: demand exactly one of the two labels.
fn build_classification_prompt(text: &str) -> String {
    format!(
        "Classifique o seguinte e-mail em português como \"Produtivo\" ou \"Improdutivo\":\n\
         \n\
         E-mail: {}\n\
         \n\
         Um e-mail \"Produtivo\" geralmente contém solicitações, problemas, dúvidas, \
         questões comerciais ou requer alguma ação. Um e-mail \"Improdutivo\" é geralmente \
         composto por saudações, agradecimentos, mensagens sociais ou não requer ação.\n\
         \n\
         Responda APENAS com \"Produtivo\" ou \"Improdutivo\", nada mais.",
        truncate_input(text)
    )
}

/// Category-specific reply prompt.
fn build_reply_prompt(category: Category, text: &str) -> String {
    match category {
        Category::Productive => format!(
            "Escreva uma resposta profissional e útil em português para o seguinte e-mail, \
             demonstrando empatia e oferecendo suporte. Seja conciso e direto (máximo 3 frases).\n\
             \n\
             E-mail: {}\n\
             \n\
             Resposta:",
            truncate_input(text)
        ),
        Category::Unproductive => format!(
            "Escreva uma resposta educada em português para o seguinte e-mail, \
             agradecendo o contato e mantendo um tom cordial. Seja breve (máximo 2 frases).\n\
             \n\
             E-mail: {}\n\
             \n\
             Resposta:",
            truncate_input(text)
        ),
    }
}
