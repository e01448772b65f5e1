//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the [`Renderer`] and [`RenderContext`] traits that abstract
//! over the browser engine (Chromium via chromiumoxide in production),
//! plus the [`EngineLauncher`] factory that boots one engine instance per
//! in-flight search request.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

/// Result of navigating a context to a URL.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    /// The final URL after any redirects; relative references on the page
    /// resolve against this.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can open rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a new isolated page context (tab).
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
    /// Shut the engine down, tearing down any pages still open.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently open contexts.
    fn active_contexts(&self) -> usize;
}

/// A single page context for rendering one source's search page.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL, waiting for the load to settle, bounded by
    /// `timeout_ms`. Timeout or an unreachable page is an error.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationOutcome>;

    /// Poll until any of `selectors` matches an element, up to
    /// `timeout_ms`. Returns whether a match appeared; running out of
    /// time is a normal `Ok(false)`, not an error.
    async fn wait_for_any(&self, selectors: &[&str], timeout_ms: u64) -> Result<bool>;

    /// Snapshot of the rendered document.
    async fn html(&self) -> Result<String>;

    /// Release this context. Must be called on every exit path.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Factory for per-request engine instances.
///
/// Each search request owns its engine exclusively for the request's
/// lifetime; concurrent requests each launch their own. Tests substitute
/// a stub launcher serving fixture documents.
#[async_trait]
pub trait EngineLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Renderer>>;
}
