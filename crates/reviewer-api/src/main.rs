use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use reviewer_llm::PromptForwarder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reviewer_api::config::ApiConfig;
use reviewer_api::router::create_router;
use reviewer_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reviewer_api=info,reviewer_llm=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    let forwarder = match init_forwarder(&config) {
        Ok(forwarder) => forwarder,
        Err(e) => {
            tracing::error!("Failed to configure the reviewer: {:#}", e);
            tracing::error!(
                "Remediation:\n\
                1. Set GOOGLE_GEMINI_KEY to a Gemini API key\n\
                2. Check REVIEWER_CONFIG points to a readable TOML file, if set\n\
                3. Check REVIEWER_MODEL / REVIEWER_BASE_URL / REVIEWER_TIMEOUT_SECS values"
            );
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        model = %forwarder.model(),
        provider = forwarder.provider(),
        "Starting Reviewer API server"
    );

    let state = Arc::new(AppState::new(forwarder));

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid REVIEWER_CORS_ORIGIN: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the Gemini forwarder from the layered settings and GOOGLE_GEMINI_KEY
fn init_forwarder(config: &ApiConfig) -> anyhow::Result<PromptForwarder> {
    let settings = config.forwarder_settings()?;
    let forwarder_config = settings.forwarder_config()?;
    Ok(PromptForwarder::gemini(forwarder_config)?)
}
