//! The fixed set of hotel-listing sources.
//!
//! A [`Source`] is static identity plus a selector profile; the
//! [`SourceRegistry`] is built once at startup and handed to the
//! orchestrator explicitly. Adding a site means adding one entry and one
//! profile, nothing is discovered at runtime.

pub mod profiles;

use profiles::SelectorProfile;
use url::Url;

/// One external website configured as a listing provider.
#[derive(Debug)]
pub struct Source {
    /// Stable key used in requests and in emitted listings.
    pub key: &'static str,
    pub display_name: &'static str,
    /// Search endpoint without the query parameter.
    base: &'static str,
    /// Name of the query parameter the site's search page expects.
    query_param: &'static str,
    pub profile: &'static SelectorProfile,
}

impl Source {
    /// Canonical search URL for a query, percent-encoded.
    pub fn search_url(&self, query: &str) -> String {
        // The bases are static and covered by tests, so a parse failure
        // here is a registry regression.
        let mut url = Url::parse(self.base).expect("source base URL is valid");
        url.query_pairs_mut().append_pair(self.query_param, query);
        url.into()
    }
}

/// Immutable registry of all supported sources, in canonical order.
#[derive(Debug)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    /// The four built-in sources.
    pub fn builtin() -> Self {
        Self {
            sources: vec![
                Source {
                    key: "kiwi",
                    display_name: "Kiwi Collection",
                    base: "https://www.kiwicollection.com/search",
                    query_param: "keyword",
                    profile: &profiles::KIWI,
                },
                Source {
                    key: "virtuoso",
                    display_name: "Virtuoso",
                    base: "https://www.virtuoso.com/travel/luxury-hotels/search",
                    query_param: "searchText",
                    profile: &profiles::VIRTUOSO,
                },
                Source {
                    key: "michelin",
                    display_name: "Michelin Guide",
                    base: "https://guide.michelin.com/en/hotels-stays",
                    query_param: "q",
                    profile: &profiles::MICHELIN,
                },
                Source {
                    key: "mrAndMrsSmith",
                    display_name: "Mr & Mrs Smith",
                    base: "https://www.mrandmrssmith.com/search",
                    query_param: "q",
                    profile: &profiles::MR_AND_MRS_SMITH,
                },
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.key == key)
    }

    /// Resolve a requested key subset against the registry.
    ///
    /// `None` selects every source. Unknown keys are dropped without
    /// error, and the result always follows registry order regardless of
    /// the order keys were requested in.
    pub fn resolve(&self, keys: Option<&[String]>) -> Vec<&Source> {
        match keys {
            None => self.sources.iter().collect(),
            Some(keys) => self
                .sources
                .iter()
                .filter(|s| keys.iter().any(|k| k == s.key))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(selected: &[&Source]) -> Vec<&'static str> {
        selected.iter().map(|s| s.key).collect()
    }

    #[test]
    fn search_urls_are_percent_encoded() {
        let registry = SourceRegistry::builtin();
        let kiwi = registry.get("kiwi").unwrap();
        assert_eq!(
            kiwi.search_url("luxury resorts"),
            "https://www.kiwicollection.com/search?keyword=luxury+resorts"
        );
        let virtuoso = registry.get("virtuoso").unwrap();
        assert!(virtuoso
            .search_url("café & spa")
            .starts_with("https://www.virtuoso.com/travel/luxury-hotels/search?searchText="));
    }

    #[test]
    fn all_base_urls_parse() {
        for source in SourceRegistry::builtin().iter() {
            // search_url panics on an invalid base; touching every source
            // here keeps the registry honest.
            assert!(source.search_url("x").contains("://"));
        }
    }

    #[test]
    fn resolve_none_selects_all_in_order() {
        let registry = SourceRegistry::builtin();
        assert_eq!(
            keys(&registry.resolve(None)),
            vec!["kiwi", "virtuoso", "michelin", "mrAndMrsSmith"]
        );
    }

    #[test]
    fn resolve_drops_unknown_keys() {
        let registry = SourceRegistry::builtin();
        let requested = vec!["kiwi".to_string(), "bogus".to_string()];
        let only_kiwi = vec!["kiwi".to_string()];
        assert_eq!(
            keys(&registry.resolve(Some(&requested))),
            keys(&registry.resolve(Some(&only_kiwi)))
        );
    }

    #[test]
    fn resolve_follows_registry_order_not_request_order() {
        let registry = SourceRegistry::builtin();
        let requested = vec!["michelin".to_string(), "kiwi".to_string()];
        assert_eq!(
            keys(&registry.resolve(Some(&requested))),
            vec!["kiwi", "michelin"]
        );
    }

    #[test]
    fn resolve_all_unknown_yields_empty() {
        let registry = SourceRegistry::builtin();
        let requested = vec!["expedia".to_string()];
        assert!(registry.resolve(Some(&requested)).is_empty());
    }
}
