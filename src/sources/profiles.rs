//! Per-site selector profiles.
//!
//! Each profile is an ordered set of structural signatures tuned to one
//! site's markup. Tiers are tried in sequence and the first hit wins, so a
//! layout change on a site usually demotes extraction to a coarser tier
//! instead of breaking it. The sites render listings client-side and shift
//! class names between releases, hence the substring class matches.

/// One way to read a field off a card: a selector plus, optionally, the
/// attribute to take instead of the element text.
#[derive(Debug, Clone, Copy)]
pub struct FieldTier {
    pub selector: &'static str,
    pub attr: Option<&'static str>,
}

/// Ordered structural signatures for one source site.
#[derive(Debug)]
pub struct SelectorProfile {
    /// Signatures whose appearance means listings have rendered. Used for
    /// the best-effort readiness wait, never as a hard requirement.
    pub ready: &'static [&'static str],
    /// Card tiers. The first tier matching at least one element wins.
    pub cards: &'static [&'static str],
    /// Field tiers, first non-empty match wins.
    pub name: &'static [&'static str],
    pub location: &'static [&'static str],
    pub description: &'static [&'static str],
    pub website: &'static [FieldTier],
    pub image: &'static [FieldTier],
}

const LINK_HREF: &[FieldTier] = &[FieldTier {
    selector: "a",
    attr: Some("href"),
}];

const IMG_SRC: &[FieldTier] = &[FieldTier {
    selector: "img",
    attr: Some("src"),
}];

pub static KIWI: SelectorProfile = SelectorProfile {
    ready: &[".hotel-card", ".property-card", "[class*=\"hotel\"]"],
    cards: &[
        ".hotel-card",
        ".property-card",
        "[class*=\"HotelCard\"]",
        "[class*=\"property\"]",
    ],
    name: &["h2", "h3", "[class*=\"name\"]", "[class*=\"title\"]"],
    location: &["[class*=\"location\"]", "[class*=\"city\"]"],
    description: &["[class*=\"description\"]", "p"],
    website: LINK_HREF,
    image: IMG_SRC,
};

pub static VIRTUOSO: SelectorProfile = SelectorProfile {
    ready: &["[class*=\"hotel\"]", "[class*=\"property\"]", "[class*=\"card\"]"],
    cards: &[
        "[class*=\"hotel-card\"]",
        "[class*=\"property\"]",
        "[class*=\"SearchResult\"]",
        "[class*=\"card\"]",
    ],
    name: &["h2", "h3", "[class*=\"name\"]", "[class*=\"title\"]"],
    location: &["[class*=\"location\"]", "[class*=\"destination\"]"],
    description: &["[class*=\"description\"]", "[class*=\"summary\"]"],
    website: LINK_HREF,
    image: IMG_SRC,
};

pub static MICHELIN: SelectorProfile = SelectorProfile {
    ready: &["[class*=\"card\"]", "[class*=\"hotel\"]"],
    cards: &["[class*=\"card\"]", "[class*=\"poi-card\"]", "[class*=\"hotel\"]"],
    name: &["h2", "h3", "[class*=\"title\"]", "[class*=\"name\"]"],
    location: &["[class*=\"location\"]", "[class*=\"address\"]"],
    description: &["[class*=\"description\"]"],
    website: LINK_HREF,
    // Michelin lazy-loads card images, so fall back to the data-src the
    // loader reads from.
    image: &[
        FieldTier {
            selector: "img",
            attr: Some("src"),
        },
        FieldTier {
            selector: "img",
            attr: Some("data-src"),
        },
    ],
};

pub static MR_AND_MRS_SMITH: SelectorProfile = SelectorProfile {
    ready: &["[class*=\"hotel\"]", "[class*=\"property\"]"],
    cards: &[
        "[class*=\"hotel-card\"]",
        "[class*=\"property\"]",
        "article",
        "[class*=\"card\"]",
    ],
    name: &["h2", "h3", "[class*=\"name\"]", "[class*=\"title\"]"],
    location: &["[class*=\"location\"]", "[class*=\"destination\"]"],
    description: &["[class*=\"description\"]", "[class*=\"tagline\"]"],
    website: LINK_HREF,
    image: IMG_SRC,
};
