mod config;
mod error;
mod routes;

use config::AppConfig;
use extract::{Extractor, GenerationClient};
use routes::AppState;
use std::sync::Arc;
use store::DocumentStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let store = DocumentStore::open(config.upload_dir.clone()).await?;

    let backend = Arc::new(GenerationClient::new(
        config.generation.base_url.clone(),
        config.generation.api_key.clone(),
    ));
    let extractor = Extractor::new(
        backend,
        config.generation.model.clone(),
        config.generation.temperature,
    );

    let state = Arc::new(AppState { store, extractor });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
