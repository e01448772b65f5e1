//! End-to-end orchestration tests over a stub rendering engine.
//!
//! The stub serves fixture documents keyed by URL substring, so the whole
//! pipeline (registry resolution, fan-out, tiered extraction, location
//! normalization, merge order) runs exactly as in production, minus the
//! browser.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stayscout::aggregator::{Aggregator, SearchRequest};
use stayscout::config::SearchLimits;
use stayscout::error::SearchError;
use stayscout::model::SearchResponse;
use stayscout::renderer::{EngineLauncher, NavigationOutcome, RenderContext, Renderer};
use stayscout::sources::SourceRegistry;

// ── Stub engine ─────────────────────────────────────────────────

#[derive(Clone)]
enum PageScript {
    /// Serve this document.
    Html(&'static str),
    /// Fail the navigation outright.
    FailNavigation,
    /// Never finish loading.
    Hang,
}

type PageTable = Vec<(&'static str, PageScript)>;

struct StubLauncher {
    pages: Arc<PageTable>,
    launches: Arc<AtomicUsize>,
}

#[async_trait]
impl EngineLauncher for StubLauncher {
    async fn launch(&self) -> Result<Box<dyn Renderer>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubRenderer {
            pages: Arc::clone(&self.pages),
        }))
    }
}

struct StubRenderer {
    pages: Arc<PageTable>,
}

#[async_trait]
impl Renderer for StubRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        Ok(Box::new(StubContext {
            pages: Arc::clone(&self.pages),
            html: String::new(),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        0
    }
}

struct StubContext {
    pages: Arc<PageTable>,
    html: String,
}

#[async_trait]
impl RenderContext for StubContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationOutcome> {
        let script = self
            .pages
            .iter()
            .find(|(needle, _)| url.contains(needle))
            .map(|(_, script)| script.clone());
        match script {
            Some(PageScript::Html(document)) => {
                self.html = document.to_string();
                Ok(NavigationOutcome {
                    final_url: url.to_string(),
                    load_time_ms: 1,
                })
            }
            Some(PageScript::FailNavigation) => {
                Err(anyhow!("navigation timed out after {timeout_ms}ms"))
            }
            Some(PageScript::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(anyhow!("unreachable"))
            }
            None => {
                self.html = "<html><body></body></html>".to_string();
                Ok(NavigationOutcome {
                    final_url: url.to_string(),
                    load_time_ms: 1,
                })
            }
        }
    }

    async fn wait_for_any(&self, _selectors: &[&str], _timeout_ms: u64) -> Result<bool> {
        Ok(true)
    }

    async fn html(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

// ── Fixtures ────────────────────────────────────────────────────

const KIWI_RESULTS: &str = r#"
    <div class="hotel-card">
      <h3>The Dunmore</h3>
      <span class="location">Harbour Island, Bahamas</span>
      <p class="description">Pastel cottages on a pink-sand beach</p>
      <a href="/hotels/the-dunmore">view</a>
      <img src="https://cdn.kiwicollection.com/dunmore.jpg">
    </div>
    <div class="hotel-card">
      <h3>Coral Sands</h3>
      <p class="description">Barefoot-chic beachfront resort</p>
    </div>
"#;

const VIRTUOSO_RESULTS: &str = r#"
    <div class="hotel-card-block">
      <h2>The Ocean Club</h2>
      <div class="destination">Paradise Island, Bahamas</div>
      <div class="summary">A Four Seasons resort on Nassau's quiet side</div>
    </div>
"#;

const MICHELIN_RESULTS: &str = r#"
    <div class="poi-card">
      <h3>The Cove at Atlantis</h3>
      <div class="address">Nassau, Bahamas</div>
      <div class="description">Adults-first tower above twin beaches</div>
    </div>
"#;

const SMITH_RESULTS: &str = r#"
    <article>
      <h2>Compass Point</h2>
      <div class="location">Nassau, Bahamas</div>
      <div class="tagline">Technicolor huts above Love Beach</div>
    </article>
"#;

fn all_pages() -> PageTable {
    vec![
        ("kiwicollection.com", PageScript::Html(KIWI_RESULTS)),
        ("virtuoso.com", PageScript::Html(VIRTUOSO_RESULTS)),
        ("guide.michelin.com", PageScript::Html(MICHELIN_RESULTS)),
        ("mrandmrssmith.com", PageScript::Html(SMITH_RESULTS)),
    ]
}

fn aggregator_with(pages: PageTable, limits: SearchLimits) -> (Aggregator, Arc<AtomicUsize>) {
    let launches = Arc::new(AtomicUsize::new(0));
    let launcher = Arc::new(StubLauncher {
        pages: Arc::new(pages),
        launches: Arc::clone(&launches),
    });
    (
        Aggregator::new(SourceRegistry::builtin(), launcher, limits),
        launches,
    )
}

async fn run_search(
    pages: PageTable,
    limits: SearchLimits,
    request: &SearchRequest,
) -> Result<SearchResponse, SearchError> {
    let (aggregator, _) = aggregator_with(pages, limits);
    aggregator.search(request).await
}

// ── Tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn merges_all_sources_in_registry_order() {
    let response = run_search(
        all_pages(),
        SearchLimits::default(),
        &SearchRequest::all_sources("bahamas"),
    )
    .await
    .unwrap();

    assert_eq!(response.count, response.hotels.len());
    assert_eq!(response.count, 5);

    let names: Vec<&str> = response.hotels.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "The Dunmore",
            "Coral Sands",
            "The Ocean Club",
            "The Cove at Atlantis",
            "Compass Point",
        ]
    );

    let sources: Vec<&str> = response
        .hotels
        .iter()
        .map(|h| h.source_key.as_str())
        .collect();
    assert_eq!(
        sources,
        vec!["kiwi", "kiwi", "virtuoso", "michelin", "mrAndMrsSmith"]
    );
}

#[tokio::test]
async fn normalization_flows_through_the_pipeline() {
    let response = run_search(
        all_pages(),
        SearchLimits::default(),
        &SearchRequest::all_sources("bahamas"),
    )
    .await
    .unwrap();

    let dunmore = &response.hotels[0];
    assert_eq!(dunmore.city, "Harbour Island");
    assert_eq!(dunmore.country, "Bahamas");
    assert_eq!(
        dunmore.source_url,
        "https://www.kiwicollection.com/search?keyword=bahamas"
    );
    assert_eq!(
        dunmore.website_url,
        "https://www.kiwicollection.com/hotels/the-dunmore"
    );

    // No location on the card: the query stands in for the city.
    let coral_sands = &response.hotels[1];
    assert_eq!(coral_sands.location, "");
    assert_eq!(coral_sands.city, "bahamas");
    assert_eq!(coral_sands.country, "");
}

#[tokio::test]
async fn every_listing_has_a_name_and_count_matches() {
    let response = run_search(
        all_pages(),
        SearchLimits::default(),
        &SearchRequest::all_sources("bahamas"),
    )
    .await
    .unwrap();

    assert!(response.hotels.iter().all(|h| !h.name.is_empty()));
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["count"], 5);
    assert_eq!(value["hotels"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn failed_source_is_omitted_and_the_request_still_succeeds() {
    let mut pages = all_pages();
    pages[2] = ("guide.michelin.com", PageScript::FailNavigation);

    let response = run_search(
        pages,
        SearchLimits::default(),
        &SearchRequest::all_sources("bahamas"),
    )
    .await
    .unwrap();

    assert_eq!(response.count, 4);
    assert!(response.hotels.iter().all(|h| h.source_key != "michelin"));
    // Order of the survivors is unchanged.
    let sources: Vec<&str> = response
        .hotels
        .iter()
        .map(|h| h.source_key.as_str())
        .collect();
    assert_eq!(sources, vec!["kiwi", "kiwi", "virtuoso", "mrAndMrsSmith"]);
}

#[tokio::test]
async fn unknown_keys_behave_like_their_known_subset() {
    let with_bogus = run_search(
        all_pages(),
        SearchLimits::default(),
        &SearchRequest {
            query: "bahamas".into(),
            source_keys: Some(vec!["kiwi".into(), "bogus".into()]),
        },
    )
    .await
    .unwrap();

    let kiwi_only = run_search(
        all_pages(),
        SearchLimits::default(),
        &SearchRequest {
            query: "bahamas".into(),
            source_keys: Some(vec!["kiwi".into()]),
        },
    )
    .await
    .unwrap();

    assert_eq!(with_bogus, kiwi_only);
    assert_eq!(with_bogus.count, 2);
}

#[tokio::test]
async fn empty_query_fails_without_touching_the_engine() {
    let (aggregator, launches) = aggregator_with(all_pages(), SearchLimits::default());
    let result = aggregator
        .search(&SearchRequest::all_sources("   "))
        .await;
    assert!(matches!(result, Err(SearchError::InvalidQuery)));
    assert_eq!(launches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_unknown_keys_is_an_empty_success_without_an_engine() {
    let (aggregator, launches) = aggregator_with(all_pages(), SearchLimits::default());
    let response = aggregator
        .search(&SearchRequest {
            query: "bahamas".into(),
            source_keys: Some(vec!["bogus".into()]),
        })
        .await
        .unwrap();
    assert_eq!(response.count, 0);
    assert!(response.hotels.is_empty());
    assert_eq!(launches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn a_hung_source_is_cut_off_by_its_budget() {
    let pages = vec![
        ("kiwicollection.com", PageScript::Html(KIWI_RESULTS)),
        ("virtuoso.com", PageScript::Hang),
    ];
    let limits = SearchLimits {
        source_budget_ms: 100,
        ..SearchLimits::default()
    };

    let response = run_search(
        pages,
        limits,
        &SearchRequest {
            query: "bahamas".into(),
            source_keys: Some(vec!["kiwi".into(), "virtuoso".into()]),
        },
    )
    .await
    .unwrap();

    assert_eq!(response.count, 2);
    assert!(response.hotels.iter().all(|h| h.source_key == "kiwi"));
}

#[tokio::test]
async fn request_deadline_returns_partial_results() {
    let pages = vec![
        ("kiwicollection.com", PageScript::Html(KIWI_RESULTS)),
        ("virtuoso.com", PageScript::Hang),
    ];
    let limits = SearchLimits {
        request_deadline_ms: Some(200),
        ..SearchLimits::default()
    };

    let response = run_search(
        pages,
        limits,
        &SearchRequest {
            query: "bahamas".into(),
            source_keys: Some(vec!["kiwi".into(), "virtuoso".into()]),
        },
    )
    .await
    .unwrap();

    // Kiwi completed before the deadline; the hung source was abandoned.
    assert_eq!(response.count, 2);
    assert!(response.hotels.iter().all(|h| h.source_key == "kiwi"));
}

#[tokio::test]
async fn zero_cards_from_a_source_is_a_normal_empty_contribution() {
    let pages = vec![(
        "kiwicollection.com",
        PageScript::Html("<html><body><h1>No results found</h1></body></html>"),
    )];
    let response = run_search(
        pages,
        SearchLimits::default(),
        &SearchRequest {
            query: "bahamas".into(),
            source_keys: Some(vec!["kiwi".into()]),
        },
    )
    .await
    .unwrap();
    assert_eq!(response.count, 0);
}
