// Copyright 2026 Stayscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Aggregation orchestrator.
//!
//! Runs one search request end to end: validate, acquire a rendering
//! engine scoped to the request, fan out over the selected sources with
//! bounded concurrency, collect explicit per-source outcomes, and merge
//! the successes in registry order. A failed source contributes zero
//! listings and a warning; it never fails the request.

use crate::config::SearchLimits;
use crate::error::{SearchError, SourceError};
use crate::extraction;
use crate::model::{Listing, SearchResponse};
use crate::normalize;
use crate::renderer::{EngineLauncher, RenderContext, Renderer};
use crate::sources::{Source, SourceRegistry};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One aggregated search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// Source keys to search. `None` means every registered source.
    pub source_keys: Option<Vec<String>>,
}

impl SearchRequest {
    pub fn all_sources(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source_keys: None,
        }
    }
}

/// The orchestrator: registry + engine launcher + limits, stateless
/// between requests.
pub struct Aggregator {
    registry: SourceRegistry,
    launcher: Arc<dyn EngineLauncher>,
    limits: SearchLimits,
}

impl Aggregator {
    pub fn new(
        registry: SourceRegistry,
        launcher: Arc<dyn EngineLauncher>,
        limits: SearchLimits,
    ) -> Self {
        Self {
            registry,
            launcher,
            limits,
        }
    }

    /// Run one aggregated search.
    ///
    /// Fails only on an empty query or when the rendering engine cannot
    /// be acquired. Anything that goes wrong inside a single source is
    /// isolated there.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let selected = self.registry.resolve(request.source_keys.as_deref());
        if selected.is_empty() {
            // Nothing to render; an empty success needs no engine.
            return Ok(SearchResponse::new(Vec::new()));
        }

        let renderer = self
            .launcher
            .launch()
            .await
            .map_err(SearchError::Engine)?;

        info!(query, sources = selected.len(), "search started");
        let hotels = self.fan_out(renderer.as_ref(), query, &selected).await;
        info!(query, count = hotels.len(), "search complete");

        if let Err(e) = renderer.shutdown().await {
            warn!("engine shutdown failed: {e:#}");
        }

        Ok(SearchResponse::new(hotels))
    }

    /// Scrape every selected source, at most `max_concurrent_sources` at
    /// a time. The buffered stream yields outcomes in input order, so the
    /// merged result follows registry order no matter how the individual
    /// scrapes are scheduled.
    async fn fan_out(
        &self,
        renderer: &dyn Renderer,
        query: &str,
        selected: &[&Source],
    ) -> Vec<Listing> {
        let limits = &self.limits;
        let deadline = limits
            .request_deadline_ms
            .map(|ms| tokio::time::Instant::now() + Duration::from_millis(ms));

        let mut pending = stream::iter(selected.iter().copied())
            .map(|source| async move {
                let outcome = scrape_source(renderer, source, query, limits).await;
                (source, outcome)
            })
            .buffered(limits.max_concurrent_sources.max(1));

        let mut merged = Vec::new();
        loop {
            let next = match deadline {
                Some(at) => match tokio::time::timeout_at(at, pending.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        // Partial-success semantics: keep what completed,
                        // abandon the rest. In-flight pages die with the
                        // per-request engine teardown.
                        warn!("request deadline reached, returning partial results");
                        break;
                    }
                },
                None => pending.next().await,
            };
            let Some((source, outcome)) = next else {
                break;
            };
            match outcome {
                Ok(listings) => {
                    info!(
                        source = source.key,
                        count = listings.len(),
                        "source complete"
                    );
                    merged.extend(listings);
                }
                Err(e) => {
                    warn!(source = source.key, error = %e, "source failed, continuing");
                }
            }
        }
        merged
    }
}

/// Scrape a single source on its own page context.
///
/// The context is released on every exit path, including budget expiry;
/// the scrape proper runs under the per-source time budget so one hung
/// site cannot stall the request.
async fn scrape_source(
    renderer: &dyn Renderer,
    source: &Source,
    query: &str,
    limits: &SearchLimits,
) -> Result<Vec<Listing>, SourceError> {
    let mut ctx = renderer
        .new_context()
        .await
        .map_err(SourceError::Navigation)?;

    let budget = limits.source_budget();
    let outcome = match tokio::time::timeout(
        budget,
        scrape_on_page(ctx.as_mut(), source, query, limits),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(SourceError::Budget(budget)),
    };

    if let Err(e) = ctx.close().await {
        debug!(source = source.key, "page close failed: {e:#}");
    }

    outcome
}

async fn scrape_on_page(
    ctx: &mut dyn RenderContext,
    source: &Source,
    query: &str,
    limits: &SearchLimits,
) -> Result<Vec<Listing>, SourceError> {
    let url = source.search_url(query);

    let nav = ctx
        .navigate(&url, limits.nav_timeout_ms)
        .await
        .map_err(SourceError::Navigation)?;
    debug!(source = source.key, ms = nav.load_time_ms, "page loaded");

    // Card absence is not an error: extraction below simply finds nothing.
    let ready = ctx
        .wait_for_any(source.profile.ready, limits.card_wait_ms)
        .await
        .unwrap_or(false);
    if !ready {
        debug!(source = source.key, "no card signature appeared, extracting anyway");
    }

    let html = ctx.html().await.map_err(SourceError::Extraction)?;
    let raw = extraction::extract_listings(&html, &nav.final_url, source.profile, source.key)
        .map_err(|e| SourceError::Extraction(e.into()))?;

    Ok(raw
        .into_iter()
        .map(|listing| normalize::enrich(listing, query, source))
        .collect())
}
