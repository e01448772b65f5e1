//! Chromium-based renderer using chromiumoxide.

use super::{EngineLauncher, NavigationOutcome, RenderContext, Renderer};
use crate::config::EngineConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// How often the readiness wait re-checks for a card signature.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Find the Chromium binary path.
pub fn find_chromium(config: &EngineConfig) -> Option<PathBuf> {
    // 1. Explicit configuration
    if let Some(path) = &config.chromium_path {
        if path.exists() {
            return Some(path.clone());
        }
    }

    // 2. STAYSCOUT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("STAYSCOUT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 3. System PATH
    for name in ["google-chrome-stable", "google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 4. Common install locations
    let common = if cfg!(target_os = "macos") {
        vec![PathBuf::from(
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        )]
    } else {
        vec![PathBuf::from("/usr/bin/google-chrome-stable")]
    };
    for c in common {
        if c.exists() {
            return Some(c);
        }
    }

    // 5. A per-user install, if one exists
    if let Some(home) = dirs::home_dir() {
        let candidate = home.join(".stayscout/chromium/chrome");
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}

/// Launches one headless Chromium per search request.
pub struct ChromiumLauncher {
    config: EngineConfig,
}

impl ChromiumLauncher {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EngineLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn Renderer>> {
        let renderer = ChromiumRenderer::launch(&self.config).await?;
        Ok(Box::new(renderer))
    }
}

/// Chromium-based renderer. One instance per in-flight request.
pub struct ChromiumRenderer {
    browser: Mutex<Browser>,
    user_agent: String,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumRenderer {
    /// Launch a headless Chromium instance with the configured executable
    /// and flags.
    pub async fn launch(config: &EngineConfig) -> Result<Self> {
        let chrome_path = find_chromium(config)
            .context("Chromium not found; set STAYSCOUT_CHROMIUM_PATH")?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu");
        for arg in &config.browser_args {
            builder = builder.arg(arg.as_str());
        }
        let browser_config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("failed to launch Chromium")?;

        // Drain CDP events until the browser goes away.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser: Mutex::new(browser),
            user_agent: config.user_agent.clone(),
            active_count: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        page.set_user_agent(self.user_agent.as_str())
            .await
            .context("failed to set user agent")?;

        self.active_count.fetch_add(1, Ordering::Relaxed);

        Ok(Box::new(ChromiumContext {
            page,
            active_count: Arc::clone(&self.active_count),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        let _ = browser.close().await;
        let _ = browser.wait().await;
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

/// A single Chromium page context.
pub struct ChromiumContext {
    page: Page,
    active_count: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationOutcome> {
        let start = Instant::now();

        let result = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.page.goto(url),
        )
        .await;

        match result {
            Ok(Ok(_page)) => {
                // Let in-flight network activity settle before snapshots.
                let _ = self.page.wait_for_navigation().await;

                let final_url = self
                    .page
                    .url()
                    .await
                    .unwrap_or_default()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| url.to_string());

                Ok(NavigationOutcome {
                    final_url,
                    load_time_ms: start.elapsed().as_millis() as u64,
                })
            }
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {timeout_ms}ms"),
        }
    }

    async fn wait_for_any(&self, selectors: &[&str], timeout_ms: u64) -> Result<bool> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            for selector in selectors {
                if self.page.find_element(*selector).await.is_ok() {
                    return Ok(true);
                }
            }
            if Instant::now() >= deadline {
                debug!("no selector matched within {timeout_ms}ms");
                return Ok(false);
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    async fn html(&self) -> Result<String> {
        let result = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await
            .context("failed to get HTML")?;

        let html: String = result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert HTML result: {e:?}"))?;

        Ok(html)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.active_count.fetch_sub(1, Ordering::Relaxed);
        let _ = self.page.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires Chromium to be installed
    async fn navigate_wait_and_snapshot() {
        let config = EngineConfig::default();
        let renderer = ChromiumRenderer::launch(&config)
            .await
            .expect("failed to launch renderer");
        let mut ctx = renderer
            .new_context()
            .await
            .expect("failed to create context");

        let nav = ctx
            .navigate(
                "data:text/html,<div class=\"hotel-card\"><h3>Test Hotel</h3></div>",
                10_000,
            )
            .await
            .expect("navigation failed");
        assert!(nav.load_time_ms < 10_000);

        let found = ctx
            .wait_for_any(&[".hotel-card"], 2_000)
            .await
            .expect("wait failed");
        assert!(found);

        let html = ctx.html().await.expect("html failed");
        assert!(html.contains("Test Hotel"));

        ctx.close().await.expect("close failed");
        assert_eq!(renderer.active_contexts(), 0);

        renderer.shutdown().await.expect("shutdown failed");
    }
}
