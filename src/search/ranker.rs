//! Cosine similarity ranking over pre-embedded listings.

use crate::error::SearchError;
use crate::models::{Listing, MatchKind, SearchResult};

/// Cosine similarity between two vectors of equal length.
///
/// A zero vector on either side yields exactly 0.0 rather than NaN. Length
/// agreement is the caller's contract; [`rank_by_similarity`] enforces it
/// with a typed error before ever reaching this function.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len().min(b.len()) {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Score every listing that carries an embedding against `query_vector` and
/// return the top `limit` as results, best first.
///
/// Listings without a vector are excluded entirely, not scored as 0. A
/// listing whose vector length disagrees with the query's is a hard error:
/// it means the corpus and the query were embedded with different models,
/// and silently truncating or zero-padding would produce garbage rankings.
///
/// Pure function of its inputs; safe to call concurrently against the same
/// immutable corpus. Ties keep first-seen corpus order (stable sort), so
/// identical inputs always produce identical output order.
pub fn rank_by_similarity(
    query_vector: &[f32],
    listings: &[Listing],
    limit: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let mut scored: Vec<(f32, &Listing)> = Vec::new();

    for listing in listings {
        let Some(embedding) = &listing.embedding else {
            continue;
        };
        if embedding.len() != query_vector.len() {
            return Err(SearchError::DimensionMismatch {
                query_dim: query_vector.len(),
                listing_dim: embedding.len(),
                listing_id: listing.listing_id.clone(),
            });
        }
        scored.push((cosine_similarity(query_vector, embedding), listing));
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    Ok(scored
        .into_iter()
        .map(|(score, listing)| {
            SearchResult::from_listing(listing, score, MatchKind::SemanticEmbedding)
        })
        .collect())
}
