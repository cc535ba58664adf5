use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use vibe_search::api;
use vibe_search::config::Config;
use vibe_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!(
        "Embedding provider: {} ({})",
        config.embedding.provider,
        config.embedding.base_url
    );

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        // Serve the search page
        .route("/", get(serve_index))
        // API routes
        .route("/api/search", post(api::search::search))
        .route("/api/search", get(api::search::search_get))
        .route("/api/properties", get(api::properties::list_properties))
        .route("/api/health", get(api::properties::health))
        .route("/api/corpus/embed", post(api::corpus::embed_corpus))
        .with_state(state)
        .fallback(get(serve_index));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
