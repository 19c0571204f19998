use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nihongo_tutor::api::routes::{create_router, AppState};
use nihongo_tutor::config::ServerConfig;
use nihongo_tutor::generation::GenerationService;
use nihongo_tutor::model::GeminiModel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!("Nihongo Tutor v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", config.addr);
    tracing::info!("Model: {}", config.gemini.model);
    tracing::info!("Static files: {}", config.static_dir.display());

    let timeout = config.gemini.timeout;
    let model = GeminiModel::new(config.gemini.clone())?;
    let generation = GenerationService::new(Arc::new(model), timeout);

    let state = Arc::new(AppState { generation });
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
