use thiserror::Error;

/// Failures the search core can report to its callers.
///
/// Provider trouble is recoverable (the caller falls back to lexical
/// scoring); a dimension mismatch is not, since it means the corpus and the
/// query were embedded with incompatible models.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(
        "embedding dimension mismatch: query vector has {query_dim} dimensions \
         but listing {listing_id} has {listing_dim}"
    )]
    DimensionMismatch {
        query_dim: usize,
        listing_dim: usize,
        listing_id: String,
    },

    #[error("no listings loaded")]
    EmptyCorpus,

    #[error("embedding provider failure: {0:#}")]
    Provider(anyhow::Error),
}
