//! Integration tests for the /classify REST contract.
//!
//! Each test spins up an Axum server on a random port with a stubbed oracle
//! and exercises the real HTTP surface with reqwest.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::net::TcpListener;

use mail_triage::classifier::EmailClassifier;
use mail_triage::error::LlmError;
use mail_triage::llm::LlmProvider;
use mail_triage::server::app_routes;

/// Stub oracle returning a fixed response (no real API calls).
struct StubLlm {
    response: Option<String>,
    calls: AtomicUsize,
}

impl StubLlm {
    fn answering(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn model_name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed {
                provider: "stub".to_string(),
                reason: "stubbed failure".to_string(),
            }),
        }
    }
}

/// Start a server on a random port, return its base URL.
async fn start_server(llm: Arc<StubLlm>) -> String {
    let classifier = Arc::new(EmailClassifier::new(
        llm,
        100,
        Duration::from_secs(60),
        100,
    ));
    let app = app_routes(classifier);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn classify_json_text_returns_oracle_category() {
    let llm = Arc::new(StubLlm::answering("Produtivo"));
    let base = start_server(Arc::clone(&llm)).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/classify", base))
        .json(&serde_json::json!({"text": "Preciso de ajuda com minha fatura"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["category"], "Produtivo");
    assert_eq!(body["response"], "Produtivo"); // stub's verbatim reply text
    assert_eq!(body["filename"], Value::Null);
    assert!(body["processing_time"].is_number());
    assert_eq!(
        body["text_length"],
        "Preciso de ajuda com minha fatura".chars().count()
    );
}

#[tokio::test]
async fn classify_form_field_is_accepted() {
    let llm = Arc::new(StubLlm::answering("Improdutivo"));
    let base = start_server(llm).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/classify", base))
        .form(&[("email_text", "Muito obrigado, feliz natal e boas festas!")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["category"], "Improdutivo");
}

#[tokio::test]
async fn classify_txt_upload_extracts_and_classifies() {
    let llm = Arc::new(StubLlm::answering("Produtivo"));
    let base = start_server(llm).await;

    let part = reqwest::multipart::Part::bytes("Tenho uma dúvida sobre o contrato".as_bytes())
        .file_name("email.txt");
    let form = reqwest::multipart::Form::new().part("file", part);

    let body: Value = reqwest::Client::new()
        .post(format!("{}/classify", base))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "email.txt");
    assert_eq!(body["category"], "Produtivo");
}

#[tokio::test]
async fn unsupported_upload_extension_is_rejected() {
    let llm = Arc::new(StubLlm::answering("Produtivo"));
    let base = start_server(Arc::clone(&llm)).await;

    let part = reqwest::multipart::Part::bytes("conteúdo qualquer".as_bytes().to_vec())
        .file_name("email.docx");
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = reqwest::Client::new()
        .post(format!("{}/classify", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("não suportado"));
    // Rejected before any classification work.
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn short_text_is_rejected_before_classification() {
    let llm = Arc::new(StubLlm::answering("Produtivo"));
    let base = start_server(Arc::clone(&llm)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/classify", base))
        .json(&serde_json::json!({"text": "   curto    "}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oracle_failure_still_returns_a_result() {
    // The endpoint must answer even when every oracle call errors: the
    // fallback classifies by keywords and the reply is a canned sentence.
    let llm = Arc::new(StubLlm::failing());
    let base = start_server(llm).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/classify", base))
        .json(&serde_json::json!({
            "text": "Preciso de suporte urgente com erro no sistema de login"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["category"], "Produtivo");
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_text_served_from_cache() {
    let llm = Arc::new(StubLlm::answering("Produtivo"));
    let base = start_server(Arc::clone(&llm)).await;

    let client = reqwest::Client::new();
    for _ in 0..3 {
        let body: Value = client
            .post(format!("{}/classify", base))
            .json(&serde_json::json!({"text": "Qual o prazo do projeto atual?"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["category"], "Produtivo");
    }

    // One classification call + one reply call; repeats hit the caches.
    assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn health_reports_model_and_oracle_status() {
    let llm = Arc::new(StubLlm::answering("pong"));
    let base = start_server(llm).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "stub");
}

#[tokio::test]
async fn health_is_unhealthy_when_oracle_errors() {
    let llm = Arc::new(StubLlm::failing());
    let base = start_server(llm).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 503);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["oracle_connection"], "failed");
}
