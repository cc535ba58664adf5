use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw listing row as supplied by the corpus source (an MLS export).
/// Everything is optional except what enrichment minimally needs; rows
/// missing those fields are skipped, not fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(default)]
    pub listing_id: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub list_price: Option<f64>,
    /// Free text, e.g. "3" or "3 (4)" when a possible fourth bedroom exists
    #[serde(default)]
    pub bedrooms: Option<String>,
    #[serde(default)]
    pub full_bathrooms: Option<f64>,
    #[serde(default)]
    pub square_footage: Option<f64>,
    #[serde(default)]
    pub lot_acres: Option<f64>,
    /// Free text, possibly comma-separated ("Victorian, Craftsman")
    #[serde(default)]
    pub architectural_style: Option<String>,
    #[serde(default)]
    pub public_remarks: Option<String>,
    #[serde(default)]
    pub exterior_features: Option<String>,
    #[serde(default)]
    pub parking_features: Option<String>,
    #[serde(default)]
    pub patio_features: Option<String>,
    #[serde(default)]
    pub pool: Option<bool>,
    #[serde(default)]
    pub fireplaces: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub days_on_market: Option<u32>,
}

/// An enriched listing. Created once during offline corpus preparation and
/// read-only afterwards; searches attach scores to copies, never to the
/// stored listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: String,
    /// Street address plus city, e.g. "12 Tower Rd, Placerville"
    pub address: String,
    pub city: String,
    pub zip_code: Option<String>,
    /// Non-negative; 0 when the source row had no price
    pub price: f64,
    pub bedrooms: String,
    pub bathrooms: f64,
    pub sqft: f64,
    pub lot_acres: f64,
    pub architectural_style: Option<String>,
    pub original_description: Option<String>,
    /// The vibe-enriched text used as the embedding surface
    pub enhanced_description: String,
    pub status: Option<String>,
    pub days_on_market: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Listing {
    /// Concatenated lowercase text the lexical scorer matches tokens against.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(self.enhanced_description.len() + 128);
        text.push_str(&self.enhanced_description);
        text.push(' ');
        if let Some(original) = &self.original_description {
            text.push_str(original);
            text.push(' ');
        }
        if let Some(style) = &self.architectural_style {
            text.push_str(style);
            text.push(' ');
        }
        text.push_str(&self.address);
        text.to_lowercase()
    }

    /// Copy of this listing with the embedding stripped, for API responses.
    pub fn without_embedding(&self) -> Listing {
        Listing {
            embedding: None,
            ..self.clone()
        }
    }
}

/// Which scoring path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Cosine similarity against provider embeddings
    SemanticEmbedding,
    /// Lexical scoring over raw query tokens
    TextMatch,
    /// Lexical scoring with the token set expanded through the concept dictionary
    Keyword,
}

/// A scored listing snapshot returned from a search. Vectors are stripped;
/// the snapshot is created per query and discarded after the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub listing_id: String,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub bedrooms: String,
    pub bathrooms: f64,
    pub sqft: f64,
    pub lot_acres: f64,
    pub architectural_style: Option<String>,
    pub description: String,
    pub days_on_market: u32,
    /// Cosine similarity in [0,1] for semantic results; normalized heuristic
    /// score (not bounded by 1) for lexical results
    pub similarity_score: f32,
    pub search_type: MatchKind,
}

impl SearchResult {
    pub fn from_listing(listing: &Listing, score: f32, search_type: MatchKind) -> Self {
        Self {
            listing_id: listing.listing_id.clone(),
            address: listing.address.clone(),
            city: listing.city.clone(),
            price: listing.price,
            bedrooms: listing.bedrooms.clone(),
            bathrooms: listing.bathrooms,
            sqft: listing.sqft,
            lot_acres: listing.lot_acres,
            architectural_style: listing.architectural_style.clone(),
            description: listing.enhanced_description.clone(),
            days_on_market: listing.days_on_market,
            similarity_score: score,
            search_type,
        }
    }
}

/// The durable corpus artifact: the only format the enrichment/embedding
/// step emits and the ranking step consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyCorpus {
    pub listings: Vec<Listing>,
    pub metadata: CorpusMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusMetadata {
    pub total_properties: usize,
    pub embedding_model: Option<String>,
    pub created_timestamp: Option<DateTime<Utc>>,
    pub embedding_dimension: Option<usize>,
}

impl PropertyCorpus {
    pub fn embedded_count(&self) -> usize {
        self.listings.iter().filter(|l| l.embedding.is_some()).count()
    }

    pub fn has_embeddings(&self) -> bool {
        self.listings.iter().any(|l| l.embedding.is_some())
    }
}

/// Search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Attempt embedding similarity before falling back to lexical scoring
    #[serde(default = "default_true")]
    pub use_semantic: bool,
    /// Expand the lexical token set through the concept dictionary
    #[serde(default = "default_true")]
    pub use_concepts: bool,
}

fn default_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_found: usize,
}
