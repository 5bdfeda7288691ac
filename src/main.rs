// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use recall_quiz::ai::GeminiClient;
use recall_quiz::config::Config;
use recall_quiz::routes;
use recall_quiz::state::AppState;
use recall_quiz::storage;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::info!("Starting with {:?}", config);

    if config.ai.api_key.is_none() {
        tracing::warn!("API_KEY is not set; quiz generation will fail until it is configured");
    }

    // Schema creation is idempotent, so this runs on every start.
    let pool = storage::connect(&config.database_url).await?;
    tracing::info!("Database ready at {}", config.database_url);

    let generator = GeminiClient::new(&config.ai)?;

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        generator: Arc::new(generator),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
