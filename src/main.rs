use std::sync::Arc;

use mail_triage::classifier::EmailClassifier;
use mail_triage::config::AppConfig;
use mail_triage::llm::create_provider;
use mail_triage::server::app_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (local development; production uses real env vars).
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!(
        "   Rate limit: {} calls / {}s",
        config.rate_max_requests,
        config.rate_window.as_secs()
    );
    eprintln!("   Cache: {} entries", config.cache_capacity);
    eprintln!("   API: http://0.0.0.0:{}/classify", config.port);

    let llm = create_provider(&config)?;
    let classifier = Arc::new(EmailClassifier::from_config(llm, &config));

    let app = app_routes(classifier);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Mail Triage server started");
    axum::serve(listener, app).await?;

    Ok(())
}
