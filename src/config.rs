//! Runtime configuration, read from `STAYSCOUT_*` environment variables
//! with CLI flags layered on top by the binary.

use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP port for `serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// User agent presented to source sites.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Launch flags passed to the rendering engine when none are configured.
/// Passed through unvalidated, like any operator-supplied flags.
const DEFAULT_BROWSER_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
];

/// How the rendering engine is launched.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Explicit Chromium executable path. `None` falls back to discovery.
    pub chromium_path: Option<PathBuf>,
    /// Extra launch flags (sandboxing lives here).
    pub browser_args: Vec<String>,
    /// User agent set on every page context.
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chromium_path: None,
            browser_args: DEFAULT_BROWSER_ARGS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl EngineConfig {
    /// Build from the environment:
    /// `STAYSCOUT_CHROMIUM_PATH`, `STAYSCOUT_BROWSER_ARGS` (comma separated),
    /// `STAYSCOUT_USER_AGENT`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(p) = std::env::var("STAYSCOUT_CHROMIUM_PATH") {
            if !p.trim().is_empty() {
                cfg.chromium_path = Some(PathBuf::from(p));
            }
        }
        if let Ok(args) = std::env::var("STAYSCOUT_BROWSER_ARGS") {
            let args: Vec<String> = args
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from)
                .collect();
            if !args.is_empty() {
                cfg.browser_args = args;
            }
        }
        if let Ok(ua) = std::env::var("STAYSCOUT_USER_AGENT") {
            if !ua.trim().is_empty() {
                cfg.user_agent = ua;
            }
        }
        cfg
    }
}

/// Timeout and concurrency bounds for one aggregated search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Hard navigation timeout per source page load.
    pub nav_timeout_ms: u64,
    /// Best-effort wait for a listing-card signature to appear.
    pub card_wait_ms: u64,
    /// Total budget per source (navigation + wait + extraction).
    pub source_budget_ms: u64,
    /// Optional request-level deadline. Completed sources are still
    /// returned when it expires.
    pub request_deadline_ms: Option<u64>,
    /// How many sources may render concurrently.
    pub max_concurrent_sources: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            nav_timeout_ms: 30_000,
            card_wait_ms: 10_000,
            source_budget_ms: 45_000,
            request_deadline_ms: None,
            max_concurrent_sources: 4,
        }
    }
}

impl SearchLimits {
    /// Build from `STAYSCOUT_NAV_TIMEOUT_MS`, `STAYSCOUT_CARD_WAIT_MS`,
    /// `STAYSCOUT_SOURCE_BUDGET_MS`, `STAYSCOUT_REQUEST_DEADLINE_MS`, and
    /// `STAYSCOUT_MAX_CONCURRENT_SOURCES`.
    pub fn from_env() -> Self {
        let mut limits = Self::default();
        if let Some(v) = env_u64("STAYSCOUT_NAV_TIMEOUT_MS") {
            limits.nav_timeout_ms = v;
        }
        if let Some(v) = env_u64("STAYSCOUT_CARD_WAIT_MS") {
            limits.card_wait_ms = v;
        }
        if let Some(v) = env_u64("STAYSCOUT_SOURCE_BUDGET_MS") {
            limits.source_budget_ms = v;
        }
        if let Some(v) = env_u64("STAYSCOUT_REQUEST_DEADLINE_MS") {
            limits.request_deadline_ms = Some(v);
        }
        if let Some(v) = env_u64("STAYSCOUT_MAX_CONCURRENT_SOURCES") {
            limits.max_concurrent_sources = (v as usize).max(1);
        }
        limits
    }

    pub fn source_budget(&self) -> Duration {
        Duration::from_millis(self.source_budget_ms)
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}
