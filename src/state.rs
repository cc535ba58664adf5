use parking_lot::RwLock;
use std::sync::Arc;

use crate::concepts::ConceptDictionary;
use crate::config::Config;
use crate::corpus;
use crate::embed::cache::EmbeddingCache;
use crate::models::PropertyCorpus;

/// Shared application state. The corpus is read-mostly: queries only take
/// read locks; the write lock is held briefly by the offline embedding pass.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub corpus: Arc<RwLock<PropertyCorpus>>,
    pub concepts: Arc<ConceptDictionary>,
    pub embed_cache: Arc<EmbeddingCache>,
    pub http_client: reqwest::Client,
    /// One corpus-embedding run at a time
    pub embed_semaphore: Arc<tokio::sync::Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let concepts = ConceptDictionary::builtin();

        // Prefer the enriched corpus; fall back to enriching a raw export;
        // otherwise start empty and wait for data.
        let corpus = if config.corpus_path().exists() {
            let corpus = corpus::load_corpus(&config.corpus_path())?;
            tracing::info!(
                "Loaded {} listings ({} with embeddings)",
                corpus.listings.len(),
                corpus.embedded_count()
            );
            corpus
        } else if config.records_path().exists() {
            let records = corpus::load_records(&config.records_path())?;
            tracing::info!("Enriching {} raw listings", records.len());
            let corpus = corpus::build_corpus(&records, &concepts);
            corpus::save_corpus(&corpus, &config.corpus_path())?;
            corpus
        } else {
            tracing::warn!(
                "No listing data found in {}; starting with an empty corpus",
                config.data_dir.display()
            );
            PropertyCorpus::default()
        };

        let query_cache_size = config.query_cache_size;
        let timeout_secs = config.embedding.timeout_secs;

        Ok(Self {
            config,
            corpus: Arc::new(RwLock::new(corpus)),
            concepts: Arc::new(concepts),
            embed_cache: Arc::new(EmbeddingCache::new(query_cache_size)),
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()?,
            embed_semaphore: Arc::new(tokio::sync::Semaphore::new(1)),
        })
    }

    /// Persist the corpus to disk; failures are logged, not fatal, since the
    /// in-memory corpus stays authoritative for the serving lifetime.
    pub fn persist_corpus(&self) {
        let corpus = self.corpus.read();
        if let Err(e) = corpus::save_corpus(&corpus, &self.config.corpus_path()) {
            tracing::error!("Failed to persist corpus: {e:#}");
        }
    }
}
