//! Location normalization.
//!
//! Source sites print locations as free text, usually "City, Country" or
//! "City, Region, Country". Splitting on commas covers all four sites;
//! anything that does not split falls back to the query the user searched
//! for, which is almost always a place name.

use crate::model::{Listing, RawListing};
use crate::sources::Source;

/// Turn a raw listing into its normalized form: structured city/country
/// plus the source's canonical search URL for the query.
pub fn enrich(raw: RawListing, query: &str, source: &Source) -> Listing {
    let (city, country) = split_location(&raw.location, query);
    Listing {
        name: raw.name,
        location: raw.location,
        description: raw.description,
        website_url: raw.website_url,
        image_url: raw.image_url,
        source_key: raw.source_key,
        city,
        country,
        source_url: source.search_url(query),
    }
}

/// Split a free-text location into (city, country).
///
/// City is the first non-empty comma segment, falling back to the query
/// when nothing usable remains. Country is the last segment, and only
/// when there are at least two segments; "Tokyo" alone names a city, not
/// a country.
pub fn split_location(location: &str, query: &str) -> (String, String) {
    let segments: Vec<&str> = location.split(',').map(str::trim).collect();

    let city = segments
        .iter()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| query.to_string());

    let country = if segments.len() >= 2 {
        segments.last().copied().unwrap_or_default().to_string()
    } else {
        String::new()
    };

    (city, country)
}
