//! HTTP surface — the `/classify` endpoint and the oracle health probe.
//!
//! `/classify` accepts the three input shapes the service supports:
//! multipart form-data with a PDF/TXT `file` part, JSON `{"text": ...}`,
//! or an urlencoded form with `email_text`. Rate-limit denials and oracle
//! failures are not errors here: they silently select the heuristic path
//! and still produce a 200.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::classifier::{Category, EmailClassifier};
use crate::config::MIN_TEXT_LENGTH;
use crate::error::{Error, InputError};
use crate::extract::extract_text;

/// Request body cap (matches the original service's 16 MiB limit).
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared state for the triage routes.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<EmailClassifier>,
}

/// Build the Axum router for the service.
pub fn app_routes(classifier: Arc<EmailClassifier>) -> Router {
    let state = AppState { classifier };
    Router::new()
        .route("/classify", post(classify))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Request/response bodies ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ClassifyJsonBody {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ClassifyFormBody {
    #[serde(default)]
    email_text: String,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    category: Category,
    response: String,
    processing_time: f64,
    text_length: usize,
    filename: Option<String>,
    success: bool,
}

fn error_body(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message, "success": false })),
    )
        .into_response()
}

fn error_response(err: Error) -> Response {
    let status = match err {
        Error::Input(_) | Error::Extraction(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_body(status, err.to_string())
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /classify
///
/// Classifies an email and returns the category plus a generated reply.
async fn classify(State(state): State<AppState>, req: Request) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let (text, filename) = match read_input(req).await {
        Ok(input) => input,
        Err(response) => return response,
    };

    let text = match validate_text(&text) {
        Ok(text) => text,
        Err(err) => {
            info!(%request_id, error = %err, "Rejected invalid input");
            return error_response(err.into());
        }
    };

    let result = state.classifier.triage(&text).await;
    let processing_time = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;

    info!(
        %request_id,
        category = %result.category,
        category_source = ?result.category_source,
        reply_source = ?result.reply_source,
        text_length = text.chars().count(),
        processing_time,
        "Email triaged"
    );

    Json(ClassifyResponse {
        category: result.category,
        response: result.reply,
        processing_time,
        text_length: text.chars().count(),
        filename,
        success: true,
    })
    .into_response()
}

/// GET /health
///
/// Probes the oracle with a tiny prompt and reports connectivity.
async fn health(State(state): State<AppState>) -> Response {
    let model = state.classifier.model_name();
    match state.classifier.probe_oracle().await {
        Ok(()) => Json(serde_json::json!({
            "status": "healthy",
            "oracle_connection": "success",
            "model": model,
        }))
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unhealthy",
                    "oracle_connection": "failed",
                    "error": e.to_string(),
                    "model": model,
                })),
            )
                .into_response()
        }
    }
}

// ── Input handling ──────────────────────────────────────────────────

/// Pull the email text (and upload filename, if any) out of the request,
/// dispatching on content type.
async fn read_input(req: Request) -> Result<(String, Option<String>), Response> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        read_multipart(req).await
    } else if content_type.starts_with("application/json") {
        let Json(body) = Json::<ClassifyJsonBody>::from_request(req, &())
            .await
            .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;
        Ok((body.text, None))
    } else {
        let Form(body) = Form::<ClassifyFormBody>::from_request(req, &())
            .await
            .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;
        Ok((body.email_text, None))
    }
}

async fn read_multipart(req: Request) -> Result<(String, Option<String>), Response> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut text = String::new();
    let mut filename = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(error_body(StatusCode::BAD_REQUEST, e.to_string())),
        };

        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("").to_string();
                if name.is_empty() {
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;
                text = extract_text(&name, &bytes).map_err(error_response)?;
                filename = Some(name);
            }
            Some("email_text") => {
                text = field
                    .text()
                    .await
                    .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))?;
            }
            _ => {}
        }
    }

    Ok((text, filename))
}

/// Validate the trimmed input text before any classification work.
fn validate_text(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let length = trimmed.chars().count();
    if length < MIN_TEXT_LENGTH {
        return Err(InputError::TooShort {
            length,
            min: MIN_TEXT_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}
