//! Listing data model shared across extraction, normalization, and the API.

use serde::{Deserialize, Serialize};

/// One hotel entry as pulled from a single result card, before location
/// normalization. `name` is guaranteed non-empty by the extractor; every
/// other field may be empty when the card's markup carries nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub name: String,
    pub location: String,
    pub description: String,
    pub website_url: String,
    pub image_url: String,
    /// Key of the source the card was scraped from.
    pub source_key: String,
}

/// A normalized hotel listing as returned by the search API.
///
/// The camelCase wire names (`websiteURL`, `sourceURL`, ...) are part of
/// the public response contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "source")]
    pub source_key: String,
    pub city: String,
    pub country: String,
    /// Canonical search URL of the originating source for this query.
    #[serde(rename = "sourceURL")]
    pub source_url: String,
}

/// Response envelope for an aggregated search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hotels: Vec<Listing>,
    pub count: usize,
}

impl SearchResponse {
    /// Build a response; `count` always mirrors the listing count.
    pub fn new(hotels: Vec<Listing>) -> Self {
        let count = hotels.len();
        Self { hotels, count }
    }
}
