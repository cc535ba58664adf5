use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::embed;
use crate::error::SearchError;
use crate::models::{SearchRequest, SearchResponse};
use crate::search::{expand, lexical, ranker};
use crate::state::AppState;

/// POST /api/search - Full search pipeline:
///   1. Concept-based query expansion (deterministic, first match wins)
///   2. Query embedding via cache or provider
///   3. Cosine similarity ranking over listing vectors
///   4. Lexical fallback whenever embeddings are missing or the provider fails
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query is required".to_string()));
    }
    if req.limit == 0 || req.limit > state.config.max_results {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("limit must be between 1 and {}", state.config.max_results),
        ));
    }

    // Locks are short and never held across awaits.
    let (corpus_empty, has_embeddings) = {
        let corpus = state.corpus.read();
        (corpus.listings.is_empty(), corpus.has_embeddings())
    };
    if corpus_empty {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            SearchError::EmptyCorpus.to_string(),
        ));
    }

    // ── Step 1: semantic path ────────────────────────────────
    if req.use_semantic && has_embeddings {
        let expanded = expand::expand_query(&query, &state.concepts);
        tracing::debug!("Query expanded to: {expanded:?}");

        match embed::embed_query_cached(
            &state.http_client,
            &state.config.embedding,
            &state.embed_cache,
            &expanded,
        )
        .await
        {
            Ok(query_vector) => {
                let corpus = state.corpus.read();
                return match ranker::rank_by_similarity(&query_vector, &corpus.listings, req.limit)
                {
                    Ok(results) => Ok(Json(SearchResponse {
                        query,
                        total_found: results.len(),
                        results,
                    })),
                    // A dimension mismatch means the corpus was embedded with
                    // a different model than the query; falling back would
                    // mask a corrupted corpus.
                    Err(e) => {
                        tracing::error!("Similarity ranking failed: {e}");
                        Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
                    }
                };
            }
            Err(e) => {
                let e = SearchError::Provider(e);
                tracing::warn!("{e}; using lexical fallback");
            }
        }
    }

    // ── Step 2: lexical fallback ─────────────────────────────
    let corpus = state.corpus.read();
    let concepts = req.use_concepts.then(|| state.concepts.as_ref());
    let results = lexical::search_lexical(
        &query,
        &corpus.listings,
        req.limit,
        concepts,
        &state.config.scorer,
    );

    Ok(Json(SearchResponse {
        query,
        total_found: results.len(),
        results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<usize>,
}

/// GET /api/search?query=…&limit=… - Same pipeline, for easy manual testing.
pub async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let req = SearchRequest {
        query: params.query,
        limit: params.limit.unwrap_or(10),
        use_semantic: true,
        use_concepts: true,
    };
    search(State(state), Json(req)).await
}
