//! Rule-based creative flourishes for the enrichment pass: scenario
//! sentences, metaphors, and abstract conceptual tags.
//!
//! Every rule is a deterministic trigger on structured fields or keyword
//! presence. No randomness: the same row always produces the same text.

use crate::models::ListingRecord;

/// How many scenario sentences may be appended per listing.
const MAX_SCENARIOS: usize = 3;
/// How many metaphor sentences may be appended per listing.
const MAX_METAPHORS: usize = 2;

/// Scenario sentences triggered by price, lot size, square footage, or
/// keyword presence in the free text. Each rule contributes independently;
/// the total is capped in trigger order.
pub fn scenario_sentences(record: &ListingRecord, combined_text: &str) -> Vec<String> {
    let mut scenarios = Vec::new();

    if record.list_price.unwrap_or(0.0) >= 1_200_000.0 {
        scenarios.push(
            "Evenings here end with guests gathered on a terrace built for entertaining."
                .to_string(),
        );
    }
    if record.lot_acres.unwrap_or(0.0) >= 5.0 {
        scenarios.push(
            "Mornings start with coffee on the porch while fog lifts off your own acreage."
                .to_string(),
        );
    }
    if record.square_footage.unwrap_or(0.0) >= 3_500.0 {
        scenarios.push(
            "There is room here for a library, a studio, and a guest wing you may forget you have."
                .to_string(),
        );
    }
    if contains_any(combined_text, &["creek", "river", "pond", "waterfall"]) {
        scenarios.push(
            "Fall asleep to the sound of water moving somewhere just beyond the windows."
                .to_string(),
        );
    }
    if contains_any(combined_text, &["barn", "stable"]) {
        scenarios.push(
            "The barn stands ready for horses, a workshop, or the project that never had space."
                .to_string(),
        );
    }
    if contains_any(combined_text, &["garden", "orchard", "greenhouse"]) {
        scenarios
            .push("Summer mornings mean picking breakfast from your own garden beds.".to_string());
    }

    scenarios.truncate(MAX_SCENARIOS);
    scenarios
}

/// Metaphor sentences from a similar trigger set, capped at two.
pub fn metaphor_sentences(record: &ListingRecord, combined_text: &str) -> Vec<String> {
    let mut metaphors = Vec::new();

    if contains_any(combined_text, &["log", "cabin", "rustic"]) {
        metaphors
            .push("The house sits like a storybook hideaway tucked into the trees.".to_string());
    }
    if record.list_price.unwrap_or(0.0) >= 1_000_000.0 && record.pool == Some(true) {
        metaphors.push("It carries itself like a private resort.".to_string());
    }
    if contains_any(combined_text, &["victorian", "historic", "ornate"]) {
        metaphors
            .push("The home wears its history the way a library wears its shelves.".to_string());
    }
    if contains_any(combined_text, &["contemporary", "minimalist", "clean lines"]) {
        metaphors.push("Clean lines give the rooms the calm of a gallery.".to_string());
    }

    metaphors.truncate(MAX_METAPHORS);
    metaphors
}

/// Profession and fantasy archetypes a listing's text evokes. Keyword
/// triggers, deduplicated, in trigger order.
pub fn conceptual_tags(combined_text: &str) -> Vec<&'static str> {
    const TRIGGERS: &[(&[&str], &[&str])] = &[
        (&["workshop", "forge"], &["maker", "artisan", "inventor"]),
        (&["library", "study"], &["scholar", "writer", "wizard"]),
        (&["tower", "turret", "stone walls"], &["wizard", "storyteller"]),
        (&["barn", "stable", "pasture"], &["equestrian", "rancher"]),
        (&["garden", "greenhouse", "orchard"], &["gardener", "homesteader"]),
        (&["vineyard", "wine cellar"], &["sommelier", "collector"]),
        (&["dock", "lakefront", "waterfront"], &["sailor", "angler"]),
    ];

    let mut tags: Vec<&'static str> = Vec::new();
    for (keywords, associated) in TRIGGERS {
        if contains_any(combined_text, keywords) {
            for tag in *associated {
                if !tags.contains(tag) {
                    tags.push(tag);
                }
            }
        }
    }
    tags
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: f64, acres: f64, sqft: f64) -> ListingRecord {
        ListingRecord {
            list_price: Some(price),
            lot_acres: Some(acres),
            square_footage: Some(sqft),
            ..ListingRecord::default()
        }
    }

    #[test]
    fn test_scenarios_capped_at_three() {
        // Five rules fire; only the first three survive.
        let r = record(1_500_000.0, 10.0, 4_000.0);
        let scenarios = scenario_sentences(&r, "a creek runs past the barn and garden");
        assert_eq!(scenarios.len(), 3);
        assert!(scenarios[0].contains("terrace"));
    }

    #[test]
    fn test_scenarios_empty_for_plain_listing() {
        let r = record(350_000.0, 0.2, 1_400.0);
        assert!(scenario_sentences(&r, "tidy suburban home").is_empty());
    }

    #[test]
    fn test_scenarios_are_deterministic() {
        let r = record(1_500_000.0, 10.0, 4_000.0);
        let a = scenario_sentences(&r, "creek and barn");
        let b = scenario_sentences(&r, "creek and barn");
        assert_eq!(a, b);
    }

    #[test]
    fn test_metaphors_capped_at_two() {
        let mut r = record(1_500_000.0, 1.0, 3_000.0);
        r.pool = Some(true);
        let metaphors = metaphor_sentences(&r, "rustic victorian with clean lines");
        assert_eq!(metaphors.len(), 2);
    }

    #[test]
    fn test_resort_metaphor_needs_price_and_pool() {
        let mut r = record(1_500_000.0, 0.5, 3_000.0);
        r.pool = Some(false);
        assert!(metaphor_sentences(&r, "plain text").is_empty());
        r.pool = Some(true);
        assert_eq!(metaphor_sentences(&r, "plain text").len(), 1);
    }

    #[test]
    fn test_conceptual_tags_trigger_and_dedup() {
        // "library" and "tower" both contribute "wizard"; it appears once.
        let tags = conceptual_tags("a stone tower with a library and a garden");
        assert_eq!(tags.iter().filter(|t| **t == "wizard").count(), 1);
        assert!(tags.contains(&"scholar"));
        assert!(tags.contains(&"gardener"));
    }

    #[test]
    fn test_conceptual_tags_empty_without_triggers() {
        assert!(conceptual_tags("three bedrooms near the freeway").is_empty());
    }
}
