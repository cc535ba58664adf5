//! Integration tests for the vibe-search pipeline.
//!
//! These exercise the full enrichment → corpus → search flow without
//! requiring a live embedding provider (the semantic path is driven with
//! hand-built vectors).

use vibe_search::concepts::ConceptDictionary;
use vibe_search::config::ScorerConfig;
use vibe_search::corpus::{build_corpus, load_corpus, save_corpus};
use vibe_search::models::{Listing, ListingRecord, MatchKind, SearchResult};
use vibe_search::search::expand::expand_query;
use vibe_search::search::lexical::search_lexical;
use vibe_search::search::ranker::rank_by_similarity;

/// Helper: the three-listing scenario corpus.
fn scenario_listings() -> Vec<Listing> {
    vec![
        listing("A", 150_000.0, "cozy rustic cabin"),
        listing("B", 1_200_000.0, "grand luxury mansion estate"),
        listing("C", 500_000.0, "modern contemporary home"),
    ]
}

fn listing(id: &str, price: f64, description: &str) -> Listing {
    Listing {
        listing_id: id.to_string(),
        address: format!("{id} Orchard Ln, Placerville"),
        city: "Placerville".to_string(),
        zip_code: None,
        price,
        bedrooms: "3".to_string(),
        bathrooms: 2.0,
        sqft: 1_900.0,
        lot_acres: 0.4,
        architectural_style: None,
        original_description: None,
        enhanced_description: description.to_string(),
        status: None,
        days_on_market: 0,
        embedding: None,
    }
}

fn sample_records() -> Vec<ListingRecord> {
    vec![
        ListingRecord {
            listing_id: Some("ML-CABIN".to_string()),
            street: Some("12 Pine Hollow Rd".to_string()),
            city: Some("Pollock Pines".to_string()),
            list_price: Some(385_000.0),
            bedrooms: Some("2".to_string()),
            full_bathrooms: Some(1.0),
            square_footage: Some(1_100.0),
            lot_acres: Some(2.3),
            architectural_style: Some("Cabin".to_string()),
            public_remarks: Some(
                "Storybook cabin tucked among the pines with a wood stove, garden beds, \
                 and a seasonal creek at the edge of the parcel."
                    .to_string(),
            ),
            fireplaces: Some(1),
            ..ListingRecord::default()
        },
        ListingRecord {
            listing_id: Some("ML-ESTATE".to_string()),
            street: Some("400 Ridgeview Ct".to_string()),
            city: Some("El Dorado Hills".to_string()),
            list_price: Some(1_850_000.0),
            bedrooms: Some("5 (6)".to_string()),
            full_bathrooms: Some(4.0),
            square_footage: Some(5_200.0),
            lot_acres: Some(6.0),
            architectural_style: Some("Mediterranean".to_string()),
            public_remarks: Some(
                "Gated estate with resort grounds, a wine cellar, and sweeping views \
                 from every terrace of this impressive residence."
                    .to_string(),
            ),
            pool: Some(true),
            ..ListingRecord::default()
        },
        // Malformed: no listing id, must be skipped without sinking the batch
        ListingRecord {
            street: Some("1 Nowhere St".to_string()),
            city: Some("Lost".to_string()),
            ..ListingRecord::default()
        },
    ]
}

#[test]
fn test_end_to_end_enrich_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    let dict = ConceptDictionary::builtin();

    let corpus = build_corpus(&sample_records(), &dict);

    // Bad row skipped, good rows enriched
    assert_eq!(corpus.listings.len(), 2);
    assert_eq!(corpus.metadata.total_properties, 2);
    assert!(corpus
        .listings
        .iter()
        .all(|l| !l.enhanced_description.is_empty()));

    // The cabin's enrichment picks up its rustic vibes
    let cabin = &corpus.listings[0];
    assert_eq!(cabin.listing_id, "ML-CABIN");
    assert!(cabin.enhanced_description.contains("Vibes:"));
    assert!(cabin.enhanced_description.to_lowercase().contains("cozy"));

    save_corpus(&corpus, &path).unwrap();
    let loaded = load_corpus(&path).unwrap();
    assert_eq!(loaded.listings.len(), 2);
    assert_eq!(loaded.listings[1].listing_id, "ML-ESTATE");
}

#[test]
fn test_end_to_end_lexical_search_over_enriched_corpus() {
    let dict = ConceptDictionary::builtin();
    let corpus = build_corpus(&sample_records(), &dict);
    let thresholds = ScorerConfig::default();

    // A vibe query with no literal overlap still finds the cabin through
    // concept expansion of the token set.
    let results = search_lexical(
        "merlin's shack",
        &corpus.listings,
        5,
        Some(&dict),
        &thresholds,
    );
    assert!(!results.is_empty());
    assert_eq!(results[0].listing_id, "ML-CABIN");
    assert_eq!(results[0].search_type, MatchKind::Keyword);

    // A luxury query favors the estate
    let results = search_lexical(
        "luxury estate with pool",
        &corpus.listings,
        5,
        Some(&dict),
        &thresholds,
    );
    assert!(!results.is_empty());
    assert_eq!(results[0].listing_id, "ML-ESTATE");
}

#[test]
fn test_scenario_corpus_fallback_rankings() {
    let listings = scenario_listings();
    let thresholds = ScorerConfig::default();

    // "luxury estate" must put the 1.2M mansion first
    let results = search_lexical("luxury estate", &listings, 5, None, &thresholds);
    assert!(!results.is_empty());
    assert_eq!(results[0].listing_id, "B");

    // "cozy cottage" must put the cabin above the others
    let results = search_lexical("cozy cottage", &listings, 5, None, &thresholds);
    assert!(!results.is_empty());
    assert_eq!(results[0].listing_id, "A");
    assert!(results.iter().all(|r| r.listing_id != "B" || r.similarity_score < results[0].similarity_score));
    assert!(results.iter().all(|r| r.listing_id != "C" || r.similarity_score < results[0].similarity_score));
}

#[test]
fn test_fallback_edge_cases() {
    let listings = scenario_listings();
    let thresholds = ScorerConfig::default();

    // Empty query is an explicit contract: exactly no results
    assert!(search_lexical("", &listings, 5, None, &thresholds).is_empty());

    // Nonsense token with no corpus occurrence
    assert!(search_lexical("xyzabc123nonexistent", &listings, 5, None, &thresholds).is_empty());

    // Arbitrarily long queries must not blow up
    let long_query = "luxury ".repeat(1_000);
    let results = search_lexical(&long_query, &listings, 5, None, &thresholds);
    assert!(results.len() <= 5);
}

#[test]
fn test_end_to_end_semantic_ranking_with_vectors() {
    let mut listings = scenario_listings();
    // Hand-built 3-dimensional embeddings: cabin, mansion, modern directions
    listings[0].embedding = Some(vec![0.9, 0.1, 0.0]);
    listings[1].embedding = Some(vec![0.1, 0.9, 0.1]);
    listings[2].embedding = Some(vec![0.0, 0.1, 0.9]);

    // Query near the "mansion" direction
    let results = rank_by_similarity(&[0.2, 0.9, 0.1], &listings, 2).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].listing_id, "B");
    assert_eq!(results[0].search_type, MatchKind::SemanticEmbedding);
    assert!(results[0].similarity_score > results[1].similarity_score);
    assert!(results[0].similarity_score <= 1.0 + 1e-6);
}

#[test]
fn test_semantic_path_excludes_unvectored_listings() {
    let mut listings = scenario_listings();
    listings[1].embedding = Some(vec![1.0, 0.0]);

    let results = rank_by_similarity(&[1.0, 0.0], &listings, 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].listing_id, "B");
}

#[test]
fn test_expansion_feeds_richer_text_to_embedding() {
    let dict = ConceptDictionary::builtin();

    let expanded = expand_query("wizard tower retreat", &dict);
    assert!(expanded.starts_with("wizard tower retreat"));
    // The wizard concept contributes its library/ancient/stone vocabulary
    assert!(expanded.contains("library"));
    assert!(expanded.contains("ancient"));

    // Determinism across repeated calls
    assert_eq!(expanded, expand_query("wizard tower retreat", &dict));
}

#[test]
fn test_search_results_round_trip_through_corpus_format() {
    let listings = scenario_listings();
    let thresholds = ScorerConfig::default();

    let results = search_lexical("luxury estate", &listings, 5, None, &thresholds);
    assert!(!results.is_empty());

    let json = serde_json::to_string(&results).unwrap();
    let back: Vec<SearchResult> = serde_json::from_str(&json).unwrap();

    assert_eq!(back.len(), results.len());
    for (a, b) in results.iter().zip(back.iter()) {
        assert_eq!(a.listing_id, b.listing_id);
        assert!((a.similarity_score - b.similarity_score).abs() < 1e-9);
    }
}
