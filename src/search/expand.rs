//! Query expansion: rewrite a short query into a longer, semantically richer
//! one before it is embedded.
//!
//! Expansion is single-match by design. Appending every matched concept would
//! let a long query balloon without bound; taking the first match in
//! dictionary order keeps output length bounded and the result deterministic.

use crate::concepts::{token_appears_in, ConceptDictionary};

/// Appended when no concept matches, so that every query gets expanded.
const GENERIC_ENHANCEMENT: &str = "inviting comfortable home with warmth and character";

/// Expand `query` using the concept dictionary.
///
/// Three passes, first hit wins:
/// 1. whole-token containment (underscore-normalized forms included),
/// 2. any individual word of a multi-word token,
/// 3. the fixed generic enhancement phrase.
///
/// The original query is preserved verbatim as a prefix; the expansion phrase
/// is appended after a single space. Deterministic: same query and dictionary
/// always produce the same output.
pub fn expand_query(query: &str, dict: &ConceptDictionary) -> String {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        // Callers validate queries upstream; an empty query is their bug.
        // Returning it unexpanded beats inventing content for nothing.
        return query.to_string();
    }

    for entry in dict.entries() {
        if token_appears_in(entry.token, &normalized) {
            return format!("{query} {}", entry.words.join(" "));
        }
    }

    // Secondary pass: a multi-word token counts if any one of its words
    // appears ("horse" alone should still trigger "horse_property").
    for entry in dict.entries() {
        if entry.token.contains('_') && entry.token.split('_').any(|w| normalized.contains(w)) {
            return format!("{query} {}", entry.words.join(" "));
        }
    }

    format!("{query} {GENERIC_ENHANCEMENT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> ConceptDictionary {
        ConceptDictionary::builtin()
    }

    #[test]
    fn test_expansion_keeps_original_as_prefix() {
        let expanded = expand_query("Wizard tower retreat", &dict());
        assert!(expanded.starts_with("Wizard tower retreat"));
        assert!(expanded.len() > "Wizard tower retreat".len());
    }

    #[test]
    fn test_expansion_appends_matched_concept_words() {
        let expanded = expand_query("a wizard hideout", &dict());
        assert!(expanded.contains("tower"));
        assert!(expanded.contains("ancient"));
        assert!(expanded.contains("library"));
    }

    #[test]
    fn test_expansion_is_single_match_not_cumulative() {
        // Matches both "cabin" and "cottage"; only the first in dictionary
        // order (cabin, architectural block) may contribute.
        let expanded = expand_query("cabin or cottage", &dict());
        assert!(expanded.contains("hideaway")); // from cabin
        assert!(!expanded.contains("garden")); // cottage words must not appear
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let d = dict();
        let a = expand_query("cozy cottage", &d);
        let b = expand_query("cozy cottage", &d);
        assert_eq!(a, b);
    }

    #[test]
    fn test_expansion_is_case_insensitive() {
        let expanded = expand_query("LUXURY living", &dict());
        assert!(expanded.starts_with("LUXURY living"));
        assert!(expanded.contains("upscale"));
    }

    #[test]
    fn test_unmatched_query_gets_generic_enhancement() {
        let expanded = expand_query("something entirely different", &dict());
        assert_eq!(
            expanded,
            format!("something entirely different {GENERIC_ENHANCEMENT}")
        );
    }

    #[test]
    fn test_secondary_pass_matches_word_of_multiword_token() {
        // No whole token is contained in this query, but "property" is one
        // word of "horse_property", so the secondary pass fires.
        let expanded = expand_query("charming property wanted", &dict());
        assert!(expanded.contains("equestrian"));
        assert!(expanded.contains("pasture"));
    }

    #[test]
    fn test_every_query_is_longer_after_expansion() {
        for query in ["castle", "hobbit hole", "plain words", "modern", "x"] {
            let expanded = expand_query(query, &dict());
            assert!(expanded.len() > query.len(), "not expanded: {query}");
            assert!(expanded.starts_with(query));
        }
    }
}
