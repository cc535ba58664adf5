//! Offline listing enrichment: rewrite raw MLS rows into vibe-rich text.
//!
//! This runs once per listing during corpus preparation, never per query.
//! The produced paragraph is the embedding surface: base facts, matched
//! vibes, creative scenario and metaphor sentences, the original remarks,
//! and a trailing vibe-tag sentence.

pub mod creative;

use anyhow::{Context, Result};

use crate::concepts::{ConceptCategory, ConceptDictionary};
use crate::models::{Listing, ListingRecord};

/// Enrich a batch of raw rows. A malformed row is logged and skipped; it
/// never aborts the rest of the batch.
pub fn enrich_records(records: &[ListingRecord], concepts: &ConceptDictionary) -> Vec<Listing> {
    let mut listings = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        match enrich_record(record, concepts) {
            Ok(listing) => listings.push(listing),
            Err(e) => tracing::warn!("Skipping listing at row {row}: {e:#}"),
        }
    }
    listings
}

/// Enrich a single raw row into an immutable [`Listing`].
pub fn enrich_record(record: &ListingRecord, concepts: &ConceptDictionary) -> Result<Listing> {
    let listing_id = record
        .listing_id
        .clone()
        .context("missing listing id")?;
    let street = record.street.as_deref().context("missing street address")?;
    let city = record.city.as_deref().context("missing city")?;

    let enhanced_description = enhance_description(record, concepts);

    Ok(Listing {
        listing_id,
        address: format!("{street}, {city}"),
        city: city.to_string(),
        zip_code: record.zip_code.clone(),
        price: record.list_price.unwrap_or(0.0).max(0.0),
        bedrooms: bedrooms_text(record),
        bathrooms: record.full_bathrooms.unwrap_or(0.0),
        sqft: record.square_footage.unwrap_or(0.0),
        lot_acres: record.lot_acres.unwrap_or(0.0),
        architectural_style: record.architectural_style.clone(),
        original_description: record.public_remarks.clone(),
        enhanced_description,
        status: record.status.clone(),
        days_on_market: record.days_on_market.unwrap_or(0),
        embedding: None,
    })
}

/// Compose the vibe-rich description paragraph for one row.
///
/// Always returns non-empty text, even when every optional field is missing.
pub fn enhance_description(record: &ListingRecord, concepts: &ConceptDictionary) -> String {
    // Architectural vibes from the style field
    let style_lower = record
        .architectural_style
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let arch_vibes = concepts.matched_words(&style_lower, Some(ConceptCategory::ArchitecturalStyle));

    // Location and lifestyle vibes from the free-text fields
    let combined_text = combined_free_text(record);
    let mut location_vibes = concepts.matched_words(&combined_text, Some(ConceptCategory::Location));
    let mut lifestyle_vibes = concepts.matched_words(&combined_text, Some(ConceptCategory::Lifestyle));

    // Special features derived from structured fields
    let mut special_features: Vec<String> = Vec::new();
    if record.pool == Some(true) {
        special_features.push("pool and spa amenities".to_string());
        extend_unique(&mut lifestyle_vibes, &["resort-style", "luxury", "entertainment"]);
    }
    if let Some(n) = record.fireplaces.filter(|n| *n > 0) {
        let plural = if n > 1 { "s" } else { "" };
        special_features.push(format!("{n} fireplace{plural}"));
        extend_unique(&mut lifestyle_vibes, &["cozy", "warm", "gathering"]);
    }
    if record.lot_acres.unwrap_or(0.0) >= 5.0 {
        special_features.push("expansive acreage for privacy".to_string());
        extend_unique(&mut location_vibes, &["spacious", "private", "estate-like"]);
    }

    let mut parts: Vec<String> = Vec::new();

    // Opening sentence: up to 2 architecture vibes plus the address
    let address = match (record.street.as_deref(), record.city.as_deref()) {
        (Some(street), Some(city)) => format!("{street}, {city}"),
        (Some(street), None) => street.to_string(),
        _ => "an undisclosed address".to_string(),
    };
    if arch_vibes.is_empty() {
        parts.push(format!("A distinctive property at {address}."));
    } else {
        let intro: Vec<&str> = arch_vibes.iter().take(2).copied().collect();
        parts.push(format!("A {} property at {address}.", intro.join(", ")));
    }

    // Facts sentence, degraded when square footage is unknown
    let bedrooms = bedrooms_text(record);
    let bathrooms = record
        .full_bathrooms
        .map(|b| format!("{}", b as u64))
        .unwrap_or_else(|| "Multiple".to_string());
    match record.square_footage {
        Some(sqft) if sqft > 0.0 => parts.push(format!(
            "This {} square foot home offers {bedrooms} bedrooms and {bathrooms} bathrooms.",
            format_thousands(sqft)
        )),
        _ => parts.push(format!(
            "This home features {bedrooms} bedrooms and {bathrooms} bathrooms."
        )),
    }

    if let Some(acres) = record.lot_acres.filter(|a| *a > 0.0) {
        parts.push(format!(
            "Situated on {acres:.2} acres, providing ample space and privacy."
        ));
    }

    if !special_features.is_empty() {
        parts.push(format!(
            "Special features include {}.",
            special_features.join(", ")
        ));
    }

    if !lifestyle_vibes.is_empty() {
        let top: Vec<&str> = lifestyle_vibes.iter().take(3).copied().collect();
        parts.push(format!(
            "Perfect for those seeking a {} lifestyle.",
            top.join(", ")
        ));
    }

    // Creative flourishes: scenarios then metaphors, each capped
    parts.extend(creative::scenario_sentences(record, &combined_text));
    parts.extend(creative::metaphor_sentences(record, &combined_text));

    // Original remarks, whitespace-collapsed, only when substantial
    if let Some(remarks) = &record.public_remarks {
        let collapsed = collapse_whitespace(remarks);
        if collapsed.len() > 50 {
            parts.push(collapsed);
        }
    }

    // Trailing vibe tags: up to 5 unique across all buckets
    let mut all_vibes: Vec<&str> = Vec::new();
    extend_unique(&mut all_vibes, &arch_vibes);
    extend_unique(&mut all_vibes, &location_vibes);
    extend_unique(&mut all_vibes, &lifestyle_vibes);
    if !all_vibes.is_empty() {
        let tags: Vec<&str> = all_vibes.iter().take(5).copied().collect();
        parts.push(format!("Vibes: {}.", tags.join(", ")));
    }

    // Abstract conceptual tags from keyword triggers
    let tags = creative::conceptual_tags(&combined_text);
    if !tags.is_empty() {
        parts.push(format!("Evokes: {}.", tags.join(", ")));
    }

    parts.join(" ")
}

/// Build the embedding input for an already-enriched listing: the enhanced
/// description plus style, price-tier, and acreage phrases that make the
/// vector sensitive to market class.
pub fn embedding_surface(listing: &Listing) -> String {
    let mut text = listing.enhanced_description.clone();

    if let Some(style) = &listing.architectural_style {
        text.push_str(&format!(" Architectural style: {style}."));
    }
    if listing.price > 0.0 {
        text.push_str(&format!(" Price range: {}.", price_tier(listing.price)));
    }
    if listing.lot_acres >= 5.0 {
        text.push_str(" Large acreage estate property.");
    } else if listing.lot_acres >= 1.0 {
        text.push_str(" Spacious lot with acreage.");
    }

    text
}

/// Descriptive market tier for a list price.
pub fn price_tier(price: f64) -> &'static str {
    if price < 300_000.0 {
        "affordable starter home"
    } else if price < 500_000.0 {
        "mid-range family home"
    } else if price < 800_000.0 {
        "upscale residential"
    } else if price < 1_200_000.0 {
        "luxury home"
    } else if price < 2_000_000.0 {
        "luxury estate"
    } else {
        "ultra-luxury estate"
    }
}

/// Remarks plus the feature fields, lowercased, for keyword scanning.
fn combined_free_text(record: &ListingRecord) -> String {
    [
        record.public_remarks.as_deref(),
        record.exterior_features.as_deref(),
        record.parking_features.as_deref(),
        record.patio_features.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<&str>>()
    .join(" ")
    .to_lowercase()
}

/// "3 (4)" from the MLS means three bedrooms, possibly four.
fn bedrooms_text(record: &ListingRecord) -> String {
    match &record.bedrooms {
        Some(raw) => raw.replace('(', "up to ").replace(')', ""),
        None => "Multiple".to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn extend_unique<'a>(target: &mut Vec<&'a str>, words: &[&'a str]) {
    for word in words {
        if !target.contains(word) {
            target.push(word);
        }
    }
}

/// Integer part with thousands separators ("3,200").
fn format_thousands(value: f64) -> String {
    let whole = value.round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> ConceptDictionary {
        ConceptDictionary::builtin()
    }

    fn full_record() -> ListingRecord {
        ListingRecord {
            listing_id: Some("ML200".to_string()),
            street: Some("8 Granite Way".to_string()),
            city: Some("Somerset".to_string()),
            zip_code: Some("95684".to_string()),
            list_price: Some(689_000.0),
            bedrooms: Some("3 (4)".to_string()),
            full_bathrooms: Some(2.0),
            square_footage: Some(2_450.0),
            lot_acres: Some(6.2),
            architectural_style: Some("Log, Craftsman".to_string()),
            public_remarks: Some(
                "Beautiful log home tucked into the pines with a workshop, garden beds, \
                 and a seasonal creek along the back of the property."
                    .to_string(),
            ),
            exterior_features: Some("Covered porch".to_string()),
            parking_features: Some("Detached garage".to_string()),
            patio_features: Some("Deck".to_string()),
            pool: Some(false),
            fireplaces: Some(2),
            status: Some("Active".to_string()),
            days_on_market: Some(34),
        }
    }

    #[test]
    fn test_enhance_full_record_mentions_style_vibes_and_address() {
        let text = enhance_description(&full_record(), &dict());
        // "Log, Craftsman" style: craftsman precedes log in dictionary
        // order, so its vibes open the sentence.
        assert!(text.starts_with("A artisanal, cozy property at 8 Granite Way, Somerset."));
        assert!(text.contains("2,450 square foot"));
        assert!(text.contains("3 up to 4 bedrooms"));
        assert!(text.contains("6.20 acres"));
    }

    #[test]
    fn test_enhance_reports_special_features() {
        let text = enhance_description(&full_record(), &dict());
        assert!(text.contains("2 fireplaces"));
        assert!(text.contains("expansive acreage for privacy"));
        assert!(!text.contains("pool and spa"));
    }

    #[test]
    fn test_enhance_includes_vibe_tags() {
        let text = enhance_description(&full_record(), &dict());
        assert!(text.contains("Vibes: "));
    }

    #[test]
    fn test_enhance_includes_substantial_remarks() {
        let text = enhance_description(&full_record(), &dict());
        assert!(text.contains("Beautiful log home tucked into the pines"));
    }

    #[test]
    fn test_enhance_skips_short_remarks() {
        let mut record = full_record();
        record.public_remarks = Some("Cute house.".to_string());
        let text = enhance_description(&record, &dict());
        assert!(!text.contains("Cute house."));
    }

    #[test]
    fn test_enhance_collapses_remark_whitespace() {
        let mut record = full_record();
        record.public_remarks =
            Some("Spread   across\n\nmultiple    lines with room to breathe and more".to_string());
        let text = enhance_description(&record, &dict());
        assert!(text.contains("Spread across multiple lines with room to breathe and more"));
    }

    #[test]
    fn test_enhance_degrades_without_square_footage() {
        let mut record = full_record();
        record.square_footage = None;
        let text = enhance_description(&record, &dict());
        assert!(text.contains("This home features 3 up to 4 bedrooms and 2 bathrooms."));
    }

    #[test]
    fn test_enhance_empty_record_is_still_nonempty() {
        let record = ListingRecord::default();
        let text = enhance_description(&record, &dict());
        assert!(!text.is_empty());
        assert!(text.contains("A distinctive property"));
        assert!(text.contains("Multiple bedrooms"));
    }

    #[test]
    fn test_enrich_record_requires_id_and_address() {
        let mut record = full_record();
        record.listing_id = None;
        assert!(enrich_record(&record, &dict()).is_err());

        let mut record = full_record();
        record.street = None;
        assert!(enrich_record(&record, &dict()).is_err());
    }

    #[test]
    fn test_enrich_records_skips_bad_rows_and_keeps_rest() {
        let good = full_record();
        let bad = ListingRecord::default();
        let listings = enrich_records(&[bad, good], &dict());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].listing_id, "ML200");
    }

    #[test]
    fn test_enrich_record_clamps_negative_price() {
        let mut record = full_record();
        record.list_price = Some(-5.0);
        let listing = enrich_record(&record, &dict()).unwrap();
        assert_eq!(listing.price, 0.0);
    }

    #[test]
    fn test_price_tier_breakpoints() {
        assert_eq!(price_tier(150_000.0), "affordable starter home");
        assert_eq!(price_tier(450_000.0), "mid-range family home");
        assert_eq!(price_tier(700_000.0), "upscale residential");
        assert_eq!(price_tier(900_000.0), "luxury home");
        assert_eq!(price_tier(1_500_000.0), "luxury estate");
        assert_eq!(price_tier(2_500_000.0), "ultra-luxury estate");
    }

    #[test]
    fn test_embedding_surface_appends_tier_and_acreage() {
        let listing = enrich_record(&full_record(), &dict()).unwrap();
        let surface = embedding_surface(&listing);
        assert!(surface.starts_with(&listing.enhanced_description));
        assert!(surface.contains("Architectural style: Log, Craftsman."));
        assert!(surface.contains("Price range: upscale residential."));
        assert!(surface.contains("Large acreage estate property."));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(950.0), "950");
        assert_eq!(format_thousands(2_450.0), "2,450");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
    }
}
