//! Embedding generation: provider client, bounded query cache, and the
//! offline corpus-embedding pass.

pub mod cache;
pub mod provider;

use anyhow::Result;

use crate::config::EmbeddingConfig;
use crate::enrich;
use crate::models::Listing;

use cache::EmbeddingCache;

/// Embed a query, consulting the cache first. The cache is only written on
/// success, so a provider failure can never poison it.
pub async fn embed_query_cached(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    cache: &EmbeddingCache,
    text: &str,
) -> Result<Vec<f32>> {
    if let Some(hit) = cache.get(text) {
        tracing::debug!("query embedding cache hit");
        return Ok(hit);
    }

    let vector = provider::embed_single(client, config, text).await?;
    cache.insert(text, vector.clone());
    Ok(vector)
}

/// Attach embeddings to every listing that lacks one, using the enriched
/// embedding surface as input. Returns the number of listings embedded.
///
/// Runs offline during corpus preparation; listings already carrying a
/// vector are left untouched.
pub async fn embed_listings(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    listings: &mut [Listing],
) -> Result<usize> {
    let pending: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, l)| l.embedding.is_none())
        .map(|(i, _)| i)
        .collect();

    if pending.is_empty() {
        return Ok(0);
    }

    let surfaces: Vec<String> = pending
        .iter()
        .map(|&i| enrich::embedding_surface(&listings[i]))
        .collect();

    tracing::info!("Embedding {} listings via {}", pending.len(), config.provider);
    let vectors = provider::embed_batch(client, config, &surfaces).await?;

    let mut embedded = 0;
    for (&i, vector) in pending.iter().zip(vectors.into_iter()) {
        listings[i].embedding = Some(vector);
        embedded += 1;
    }

    Ok(embedded)
}
