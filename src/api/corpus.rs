use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::embed;
use crate::models::Listing;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub started: bool,
    pub pending: usize,
}

/// POST /api/corpus/embed - Generate embeddings for every listing that lacks
/// one, in the background. Returns 202 immediately; 409 if a run is already
/// in flight.
pub async fn embed_corpus(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EmbedResponse>), (StatusCode, String)> {
    let permit = match state.embed_semaphore.clone().try_acquire_owned() {
        Ok(permit) => permit,
        Err(_) => {
            return Err((
                StatusCode::CONFLICT,
                "An embedding run is already in progress".to_string(),
            ))
        }
    };

    let pending = {
        let corpus = state.corpus.read();
        corpus.listings.len() - corpus.embedded_count()
    };
    if pending == 0 {
        return Ok((
            StatusCode::OK,
            Json(EmbedResponse {
                started: false,
                pending: 0,
            }),
        ));
    }

    let state_clone = state.clone();
    tokio::spawn(async move {
        let _permit = permit;
        if let Err(e) = run_embedding_pass(state_clone).await {
            tracing::error!("Corpus embedding failed: {e:#}");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(EmbedResponse {
            started: true,
            pending,
        }),
    ))
}

/// Snapshot the unembedded listings, call the provider outside any lock,
/// then merge the vectors back and persist.
async fn run_embedding_pass(state: AppState) -> anyhow::Result<()> {
    let mut snapshot: Vec<Listing> = {
        let corpus = state.corpus.read();
        corpus
            .listings
            .iter()
            .filter(|l| l.embedding.is_none())
            .cloned()
            .collect()
    };

    let embedded = embed::embed_listings(
        &state.http_client,
        &state.config.embedding,
        &mut snapshot,
    )
    .await?;

    {
        let mut corpus = state.corpus.write();
        for updated in snapshot {
            if let Some(listing) = corpus
                .listings
                .iter_mut()
                .find(|l| l.listing_id == updated.listing_id)
            {
                listing.embedding = updated.embedding;
            }
        }
        let dimension = corpus
            .listings
            .iter()
            .find_map(|l| l.embedding.as_ref().map(Vec::len));
        let total = corpus.listings.len();
        corpus.metadata.embedding_model = Some(state.config.embedding.model.clone());
        corpus.metadata.embedding_dimension = dimension;
        corpus.metadata.total_properties = total;
    }
    state.persist_corpus();

    tracing::info!("Embedded {embedded} listings");
    Ok(())
}
