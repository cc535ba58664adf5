//! Loading and persisting the enriched-listings artifact.
//!
//! The on-disk shape is the one durable format the system owns:
//! `{ listings: [ { ..fields.., embedding? } ], metadata: { … } }`.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use crate::concepts::ConceptDictionary;
use crate::enrich;
use crate::models::{CorpusMetadata, ListingRecord, PropertyCorpus};

/// Load an enriched corpus from `path`.
pub fn load_corpus(path: &Path) -> Result<PropertyCorpus> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus from {}", path.display()))?;
    let corpus: PropertyCorpus =
        serde_json::from_str(&data).context("Failed to parse corpus JSON")?;
    Ok(corpus)
}

/// Load raw listing rows (the pre-enrichment export) from `path`.
pub fn load_records(path: &Path) -> Result<Vec<ListingRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read listings from {}", path.display()))?;
    let records: Vec<ListingRecord> =
        serde_json::from_str(&data).context("Failed to parse listings JSON")?;
    Ok(records)
}

/// Enrich raw rows into a fresh corpus with metadata stamped.
pub fn build_corpus(records: &[ListingRecord], concepts: &ConceptDictionary) -> PropertyCorpus {
    let listings = enrich::enrich_records(records, concepts);
    let metadata = CorpusMetadata {
        total_properties: listings.len(),
        embedding_model: None,
        created_timestamp: Some(Utc::now()),
        embedding_dimension: None,
    };
    PropertyCorpus { listings, metadata }
}

/// Persist the corpus atomically (temp file + rename), so a crash mid-write
/// never leaves a truncated artifact behind.
pub fn save_corpus(corpus: &PropertyCorpus, path: &Path) -> Result<()> {
    let data = serde_json::to_string_pretty(corpus).context("Failed to serialize corpus")?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &data)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move corpus into place at {}", path.display()))?;
    Ok(())
}
