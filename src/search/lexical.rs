//! Lexical fallback scoring: weighted term overlap plus domain heuristics.
//!
//! This is the path taken when listings carry no embeddings or the provider
//! is unreachable. Unlike query expansion, token expansion here is
//! cumulative: every matched concept's words join the search token set,
//! since there is no downstream embedding to keep short.

use std::collections::HashSet;

use crate::concepts::ConceptDictionary;
use crate::config::ScorerConfig;
use crate::models::{Listing, MatchKind, SearchResult};

/// Weight for each exact-substring occurrence of a token.
const OCCURRENCE_WEIGHT: f32 = 2.0;
/// One-time bonus per distinct token present at all.
const PRESENCE_WEIGHT: f32 = 1.0;

/// Query words that signal a luxury-class price expectation.
const HIGH_PRICE_SIGNALS: &[&str] = &["luxury", "expensive", "high-end"];
/// Query words that signal a budget-class price expectation.
const LOW_PRICE_SIGNALS: &[&str] = &["affordable", "cheap", "budget"];
/// Query words asking for the small/rustic end of the market.
const RUSTIC_QUERY_SIGNALS: &[&str] = &["cottage", "cabin", "shack"];
/// Listing words that satisfy a rustic query.
const RUSTIC_TEXT_WORDS: &[&str] = &["cottage", "cabin", "rustic", "cozy"];
/// Query words asking for the estate end of the market.
const ESTATE_QUERY_SIGNALS: &[&str] = &["estate", "mansion", "luxury"];

/// Score `listings` against `query` and return the top `limit`, best first.
///
/// When `concepts` is provided the token set is expanded through the
/// dictionary and results are tagged [`MatchKind::Keyword`]; without it only
/// the raw query tokens are matched and results are tagged
/// [`MatchKind::TextMatch`].
///
/// Contract points, verified by tests: an empty or whitespace query returns
/// an empty list; listings scoring zero are excluded; scores are the raw sum
/// divided by `thresholds.score_divisor` (comparable small numbers, not
/// bounded by 1 like cosine).
pub fn search_lexical(
    query: &str,
    listings: &[Listing],
    limit: usize,
    concepts: Option<&ConceptDictionary>,
    thresholds: &ScorerConfig,
) -> Vec<SearchResult> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let kind = if concepts.is_some() {
        MatchKind::Keyword
    } else {
        MatchKind::TextMatch
    };

    let tokens = build_token_set(&query_lower, concepts);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f32, &Listing)> = Vec::new();

    for listing in listings {
        let searchable = listing.searchable_text();
        let mut score = 0.0f32;

        for token in &tokens {
            let occurrences = searchable.matches(token.as_str()).count();
            if occurrences > 0 {
                score += occurrences as f32 * OCCURRENCE_WEIGHT + PRESENCE_WEIGHT;
            }
        }

        score += heuristic_bonus(&query_lower, &searchable, listing, thresholds);

        if score > 0.0 {
            scored.push((score, listing));
        }
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(score, listing)| {
            SearchResult::from_listing(listing, score / thresholds.score_divisor, kind)
        })
        .collect()
}

/// Lowercase word tokens from the query, deduplicated in first-seen order,
/// optionally unioned with every matched concept's word set.
fn build_token_set(query_lower: &str, concepts: Option<&ConceptDictionary>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    // Single characters (the "s" left over from "merlin's") match everywhere
    // and carry no signal, so anything shorter than two chars is dropped.
    let push = |token: &str, tokens: &mut Vec<String>, seen: &mut HashSet<String>| {
        if token.len() >= 2 && seen.insert(token.to_string()) {
            tokens.push(token.to_string());
        }
    };

    for word in query_lower.split(|c: char| !c.is_alphanumeric()) {
        push(word, &mut tokens, &mut seen);
    }

    if let Some(dict) = concepts {
        for word in dict.matched_words(query_lower, None) {
            push(word, &mut tokens, &mut seen);
        }
    }

    tokens
}

/// Domain bonuses keyed on what the query asks for versus what the listing
/// is. Thresholds come from config; the defaults are the hand-tuned values.
fn heuristic_bonus(
    query_lower: &str,
    searchable: &str,
    listing: &Listing,
    thresholds: &ScorerConfig,
) -> f32 {
    let mut bonus = 0.0f32;

    let signals = |words: &[&str]| words.iter().any(|w| query_lower.contains(w));

    if signals(HIGH_PRICE_SIGNALS) && listing.price > thresholds.luxury_price {
        bonus += 5.0;
    }
    if signals(LOW_PRICE_SIGNALS) && listing.price < thresholds.affordable_price {
        bonus += 5.0;
    }
    if signals(RUSTIC_QUERY_SIGNALS)
        && RUSTIC_TEXT_WORDS.iter().any(|w| searchable.contains(w))
    {
        bonus += 10.0;
    }
    if signals(ESTATE_QUERY_SIGNALS)
        && (listing.sqft > thresholds.estate_sqft || listing.lot_acres > thresholds.estate_acres)
    {
        bonus += 10.0;
    }

    bonus
}
