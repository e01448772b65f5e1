//! Tiered listing extraction from a rendered HTML snapshot.
//!
//! Pure: snapshot in, raw listings out, no I/O. The page structures this
//! runs against are external and unversioned, so nothing here assumes a
//! single stable layout. Card tiers are tried in order and the first tier
//! that matches anything wins; each field then walks its own alternatives
//! and takes the first non-empty hit. A card that never yields a name is
//! dropped.

use crate::error::ExtractError;
use crate::model::RawListing;
use crate::sources::profiles::{FieldTier, SelectorProfile};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extract all listings from a rendered document.
///
/// `page_url` is the document's final URL, used to absolutize relative
/// link and image references. Output order is document order, so repeated
/// runs over the same snapshot are identical.
pub fn extract_listings(
    html: &str,
    page_url: &str,
    profile: &SelectorProfile,
    source_key: &str,
) -> Result<Vec<RawListing>, ExtractError> {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let cards = match_card_tier(&document, profile)?;

    let mut listings = Vec::with_capacity(cards.len());
    for card in cards {
        let Some(name) = first_text(card, profile.name)? else {
            continue;
        };
        listings.push(RawListing {
            name,
            location: first_text(card, profile.location)?.unwrap_or_default(),
            description: first_text(card, profile.description)?.unwrap_or_default(),
            website_url: first_attr(card, profile.website, base.as_ref())?.unwrap_or_default(),
            image_url: first_attr(card, profile.image, base.as_ref())?.unwrap_or_default(),
            source_key: source_key.to_string(),
        });
    }
    Ok(listings)
}

/// Find the card elements: first tier with at least one match wins.
fn match_card_tier<'a>(
    document: &'a Html,
    profile: &SelectorProfile,
) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    for tier in profile.cards {
        let selector = compile(tier)?;
        let matches: Vec<ElementRef<'a>> = document.select(&selector).collect();
        if !matches.is_empty() {
            return Ok(matches);
        }
    }
    Ok(Vec::new())
}

/// First non-empty text produced by the ordered selector alternatives.
fn first_text(
    card: ElementRef<'_>,
    tiers: &[&'static str],
) -> Result<Option<String>, ExtractError> {
    for tier in tiers {
        let selector = compile(tier)?;
        for element in card.select(&selector) {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
    }
    Ok(None)
}

/// First non-empty attribute produced by the ordered selector alternatives,
/// resolved against the page URL when relative.
fn first_attr(
    card: ElementRef<'_>,
    tiers: &[FieldTier],
    base: Option<&Url>,
) -> Result<Option<String>, ExtractError> {
    for tier in tiers {
        let selector = compile(tier.selector)?;
        for element in card.select(&selector) {
            let value = match tier.attr {
                Some(attr) => element.value().attr(attr).unwrap_or_default().to_string(),
                None => element.text().collect::<String>(),
            };
            let value = value.trim();
            if !value.is_empty() {
                return Ok(Some(absolutize(value, base)));
            }
        }
    }
    Ok(None)
}

fn absolutize(reference: &str, base: Option<&Url>) -> String {
    match base.and_then(|b| b.join(reference).ok()) {
        Some(url) => url.into(),
        None => reference.to_string(),
    }
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
