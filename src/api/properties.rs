use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::Listing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    20
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub properties: Vec<Listing>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub pages: usize,
}

/// GET /api/properties - Browse listings, paginated, embeddings stripped.
pub async fn list_properties(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<BrowseResponse>, (StatusCode, String)> {
    let per_page = params.per_page.clamp(1, 100);
    let page = params.page.max(1);

    let corpus = state.corpus.read();
    let total = corpus.listings.len();
    let properties: Vec<Listing> = corpus
        .listings
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(Listing::without_embedding)
        .collect();

    Ok(Json(BrowseResponse {
        properties,
        total,
        page,
        per_page,
        pages: total.div_ceil(per_page),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub properties_loaded: usize,
    pub embeddings_available: bool,
    pub semantic_search_available: bool,
}

/// GET /api/health - Liveness plus a summary of what the corpus can do.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let corpus = state.corpus.read();
    Json(HealthResponse {
        status: "healthy",
        properties_loaded: corpus.listings.len(),
        embeddings_available: corpus.has_embeddings(),
        semantic_search_available: state.config.embedding.api_key.is_some(),
    })
}
