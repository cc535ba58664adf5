use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where listing data and the enriched corpus are stored
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Lexical fallback scorer thresholds
    pub scorer: ScorerConfig,
    /// Hard cap on the number of results a single search may request
    pub max_results: usize,
    /// Maximum entries in the query-embedding cache
    pub query_cache_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "gemini" or "openai"
    pub provider: String,
    /// Base URL for the embedding API
    pub base_url: String,
    /// Model name for embeddings
    pub model: String,
    /// API key (required by both hosted providers)
    pub api_key: Option<String>,
    /// Embedding vector dimension
    pub embedding_dim: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Hand-tuned bonus thresholds for the lexical fallback scorer. The defaults
/// are the values observed to work on MLS exports; there is no derivation
/// behind them, so they stay configurable rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Price above which a listing counts as luxury-class
    pub luxury_price: f64,
    /// Price below which a listing counts as affordable-class
    pub affordable_price: f64,
    /// Square footage above which a listing counts as estate-sized
    pub estate_sqft: f64,
    /// Lot acreage above which a listing counts as estate-sized
    pub estate_acres: f64,
    /// Raw lexical scores are divided by this to land in a small range
    pub score_divisor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:5001".to_string(),
            embedding: EmbeddingConfig::default(),
            scorer: ScorerConfig::default(),
            max_results: 50,
            query_cache_size: 100,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "text-embedding-004".to_string(),
            api_key: None,
            embedding_dim: 768,
            timeout_secs: 30,
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            luxury_price: 800_000.0,
            affordable_price: 400_000.0,
            estate_sqft: 3_000.0,
            estate_acres: 5.0,
            score_divisor: 100.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("VIBE_SEARCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("VIBE_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(key) = std::env::var("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.embedding.embedding_dim = d;
            }
        }
        if let Ok(val) = std::env::var("EMBEDDING_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.embedding.timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("VIBE_SEARCH_MAX_RESULTS") {
            if let Ok(v) = val.parse() {
                config.max_results = v;
            }
        }
        if let Ok(val) = std::env::var("VIBE_SEARCH_CACHE_SIZE") {
            if let Ok(v) = val.parse() {
                config.query_cache_size = v;
            }
        }

        // Scorer thresholds
        if let Ok(val) = std::env::var("VIBE_SEARCH_LUXURY_PRICE") {
            if let Ok(v) = val.parse() {
                config.scorer.luxury_price = v;
            }
        }
        if let Ok(val) = std::env::var("VIBE_SEARCH_AFFORDABLE_PRICE") {
            if let Ok(v) = val.parse() {
                config.scorer.affordable_price = v;
            }
        }
        if let Ok(val) = std::env::var("VIBE_SEARCH_ESTATE_SQFT") {
            if let Ok(v) = val.parse() {
                config.scorer.estate_sqft = v;
            }
        }
        if let Ok(val) = std::env::var("VIBE_SEARCH_ESTATE_ACRES") {
            if let Ok(v) = val.parse() {
                config.scorer.estate_acres = v;
            }
        }

        config
    }

    /// Raw listing rows as exported from the MLS, before enrichment.
    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join("listings.json")
    }

    /// The enriched corpus, optionally with embeddings attached.
    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir.join("corpus.json")
    }
}
