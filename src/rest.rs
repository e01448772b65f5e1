// Copyright 2026 Stayscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API.
//!
//! A thin layer over the [`Aggregator`]: `/search` and `/health`, JSON
//! in and out, CORS wide open. All real decisions live in the pipeline.

use crate::aggregator::{Aggregator, SearchRequest};
use crate::error::SearchError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared state behind the router.
pub struct AppState {
    pub aggregator: Aggregator,
}

/// Wrapper to assert a future is Send.
///
/// The search future contains only Send types but the compiler cannot
/// prove it due to higher-ranked lifetime bounds in transitive
/// dependencies (scraper, chromiumoxide). All concrete data crossing the
/// await points is Send; the parsed document never outlives a synchronous
/// extraction call.
struct AssertSend<F>(F);

// SAFETY: The wrapped future holds Arc<AppState>, SearchRequest, String,
// and other Send types only. The compiler fails to prove Send because of
// higher-ranked lifetime bounds in transitive dependencies, not because
// of actual non-Send data.
unsafe impl<F: std::future::Future> Send for AssertSend<F> {}

impl<F: std::future::Future> std::future::Future for AssertSend<F> {
    type Output = F::Output;
    fn poll(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        // SAFETY: plain pin projection over the single field.
        let inner = unsafe { self.map_unchecked_mut(|s| &mut s.0) };
        inner.poll(cx)
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on the given port until ctrl-c.
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

#[derive(serde::Deserialize, Default)]
struct SearchParams {
    query: Option<String>,
    /// Comma-separated source keys; absent means all sources.
    #[serde(rename = "sourcesParam")]
    sources_param: Option<String>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query parameter is required" })),
        )
            .into_response();
    }

    let source_keys = params.sources_param.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });
    let request = SearchRequest { query, source_keys };

    // Spawn through AssertSend to satisfy axum's Send requirement; see
    // the wrapper above.
    let fut = AssertSend(async move { state.aggregator.search(&request).await });
    let joined = tokio::task::spawn(fut).await;

    match joined {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(SearchError::InvalidQuery)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query parameter is required" })),
        )
            .into_response(),
        Ok(Err(SearchError::Engine(e))) => {
            error!("rendering engine unavailable: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Search failed" })),
            )
                .into_response()
        }
        Err(join_error) => {
            error!("search task failed: {join_error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Search failed" })),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
