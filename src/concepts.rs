//! The concept dictionary: an ordered, immutable table mapping short concept
//! tokens to the descriptive "vibe" words they evoke.
//!
//! Iteration order is a contract, not an accident: query expansion picks the
//! FIRST matching token, so determinism depends on the table being scanned
//! exactly as authored. Categories are disjoint namespaces, but one piece of
//! text may match entries from several categories at once; matched words are
//! unioned with duplicates removed, first match winning the position.

/// Category families a concept token can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptCategory {
    /// Architectural style → descriptive adjectives ("victorian" → ornate, ...)
    ArchitecturalStyle,
    /// Location feature → vibe words ("waterfront" → serene, ...)
    Location,
    /// Lifestyle feature → vibe words ("fireplace" → cozy, ...)
    Lifestyle,
    /// Abstract or fantasy archetype → multi-word expansions ("wizard" → tower stone ...)
    Archetype,
}

/// One concept token with its associated word set. Multi-word tokens use
/// underscores ("horse_property"); matching normalizes them away.
#[derive(Debug, Clone, Copy)]
pub struct ConceptEntry {
    pub token: &'static str,
    pub category: ConceptCategory,
    pub words: &'static [&'static str],
}

use ConceptCategory::{ArchitecturalStyle, Archetype, Lifestyle, Location};

/// The built-in table. Order matters; append new entries at the end of their
/// category block rather than re-sorting.
const ENTRIES: &[ConceptEntry] = &[
    // ── Architectural styles ─────────────────────────────
    ConceptEntry { token: "victorian", category: ArchitecturalStyle, words: &["classic", "elegant", "historical", "ornate", "grandeur", "timeless"] },
    ConceptEntry { token: "contemporary", category: ArchitecturalStyle, words: &["modern", "sleek", "minimalist", "cutting-edge", "sophisticated"] },
    ConceptEntry { token: "craftsman", category: ArchitecturalStyle, words: &["artisanal", "cozy", "handcrafted", "warm", "character"] },
    ConceptEntry { token: "log", category: ArchitecturalStyle, words: &["rustic", "cabin", "woodsy", "natural", "retreat", "mountain"] },
    ConceptEntry { token: "cabin", category: ArchitecturalStyle, words: &["cozy", "intimate", "rustic", "hideaway", "charming"] },
    ConceptEntry { token: "ranch", category: ArchitecturalStyle, words: &["single-story", "family-friendly", "spacious", "practical"] },
    ConceptEntry { token: "traditional", category: ArchitecturalStyle, words: &["classic", "family-oriented", "established", "comfortable"] },
    ConceptEntry { token: "mediterranean", category: ArchitecturalStyle, words: &["luxury", "resort-style", "exotic", "sophisticated"] },
    ConceptEntry { token: "colonial", category: ArchitecturalStyle, words: &["stately", "formal", "traditional", "prestigious"] },
    // ── Location features ────────────────────────────────
    ConceptEntry { token: "gated", category: Location, words: &["exclusive", "private", "secure", "elite", "prestigious"] },
    ConceptEntry { token: "acreage", category: Location, words: &["spacious", "private", "expansive", "freedom", "nature"] },
    ConceptEntry { token: "waterfront", category: Location, words: &["serene", "peaceful", "tranquil", "luxury"] },
    ConceptEntry { token: "mountain", category: Location, words: &["scenic", "elevated", "peaceful", "retreat"] },
    ConceptEntry { token: "mountain_view", category: Location, words: &["scenic", "panoramic", "elevated", "inspiring"] },
    ConceptEntry { token: "rural", category: Location, words: &["quiet", "peaceful", "escape", "private", "nature"] },
    ConceptEntry { token: "downtown", category: Location, words: &["convenient", "walkable", "vibrant", "urban"] },
    // ── Lifestyle features ───────────────────────────────
    ConceptEntry { token: "horse", category: Lifestyle, words: &["equestrian", "rural", "country", "spacious", "barn"] },
    ConceptEntry { token: "horse_property", category: Lifestyle, words: &["equestrian", "barn", "pasture", "acreage", "country"] },
    ConceptEntry { token: "pool", category: Lifestyle, words: &["luxury", "entertainment", "resort-style", "relaxation"] },
    ConceptEntry { token: "workshop", category: Lifestyle, words: &["creative", "practical", "maker", "artisan"] },
    ConceptEntry { token: "garden", category: Lifestyle, words: &["green", "peaceful", "nature", "growing", "nurturing"] },
    ConceptEntry { token: "wine", category: Lifestyle, words: &["sophisticated", "entertaining", "luxury", "collector"] },
    ConceptEntry { token: "wine_cellar", category: Lifestyle, words: &["collector", "tasting", "entertaining", "sophisticated"] },
    ConceptEntry { token: "solar", category: Lifestyle, words: &["sustainable", "modern", "eco-friendly", "efficient"] },
    ConceptEntry { token: "fireplace", category: Lifestyle, words: &["cozy", "warm", "gathering", "intimate"] },
    // ── Archetypes ───────────────────────────────────────
    ConceptEntry { token: "merlin", category: Archetype, words: &["magical", "cottage", "rustic", "secluded", "woodsy", "character", "whimsical"] },
    ConceptEntry { token: "wizard", category: Archetype, words: &["tower", "stone", "library", "ancient", "mystical", "secluded"] },
    ConceptEntry { token: "hobbit", category: Archetype, words: &["cozy", "underground", "circular", "garden", "intimate", "charming"] },
    ConceptEntry { token: "castle", category: Archetype, words: &["grand", "stone", "towers", "majestic", "fortress", "medieval"] },
    ConceptEntry { token: "mansion", category: Archetype, words: &["grand", "luxury", "estate", "formal", "impressive", "wealth"] },
    ConceptEntry { token: "cottage", category: Archetype, words: &["cozy", "small", "charming", "intimate", "garden", "peaceful"] },
    ConceptEntry { token: "shack", category: Archetype, words: &["cottage", "cabin", "small", "cozy", "rustic", "simple"] },
    ConceptEntry { token: "retreat", category: Archetype, words: &["private", "peaceful", "escape", "secluded", "relaxation"] },
    ConceptEntry { token: "compound", category: Archetype, words: &["multiple buildings", "family", "expansive", "estate", "generational"] },
    ConceptEntry { token: "luxury", category: Archetype, words: &["upscale", "premium", "high-end", "elegant", "sophisticated"] },
    ConceptEntry { token: "modern", category: Archetype, words: &["contemporary", "updated", "sleek", "minimalist"] },
    ConceptEntry { token: "family", category: Archetype, words: &["spacious", "bedrooms", "yard", "neighborhood", "schools"] },
];

/// Immutable lookup table over the concept entries. Loaded once and shared
/// read-only across concurrent callers.
pub struct ConceptDictionary {
    entries: Vec<ConceptEntry>,
}

impl ConceptDictionary {
    /// The built-in dictionary in its authored order.
    pub fn builtin() -> Self {
        Self {
            entries: ENTRIES.to_vec(),
        }
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[ConceptEntry] {
        &self.entries
    }

    /// Exact (case-insensitive) token lookup.
    pub fn lookup(&self, token: &str) -> Option<&'static [&'static str]> {
        let needle = token.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.token == needle)
            .map(|e| e.words)
    }

    /// Union of words from every entry (optionally restricted to one
    /// category) whose token appears in `text`. `text` must already be
    /// lowercase. Order of first match is preserved, duplicates removed.
    pub fn matched_words(&self, text: &str, category: Option<ConceptCategory>) -> Vec<&'static str> {
        let mut words = Vec::new();
        for entry in &self.entries {
            if let Some(c) = category {
                if entry.category != c {
                    continue;
                }
            }
            if token_appears_in(entry.token, text) {
                for word in entry.words {
                    if !words.contains(word) {
                        words.push(*word);
                    }
                }
            }
        }
        words
    }
}

/// Case-sensitive containment of a concept token inside lowercase `text`,
/// trying both the underscore-to-space and the no-separator forms.
pub fn token_appears_in(token: &str, text: &str) -> bool {
    if !token.contains('_') {
        return text.contains(token);
    }
    let spaced = token.replace('_', " ");
    if text.contains(&spaced) {
        return true;
    }
    let compact = token.replace('_', "");
    text.contains(&compact)
}
