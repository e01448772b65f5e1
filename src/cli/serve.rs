//! Run the HTTP API.

use crate::aggregator::Aggregator;
use crate::config::{EngineConfig, SearchLimits};
use crate::renderer::chromium::ChromiumLauncher;
use crate::rest::{self, AppState};
use crate::sources::SourceRegistry;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Build the production aggregator and serve until shutdown.
pub async fn run(port: u16) -> Result<()> {
    let engine = EngineConfig::from_env();
    let limits = SearchLimits::from_env();

    info!(
        "starting stayscout v{} on port {port}",
        env!("CARGO_PKG_VERSION")
    );

    let aggregator = Aggregator::new(
        SourceRegistry::builtin(),
        Arc::new(ChromiumLauncher::new(engine)),
        limits,
    );

    rest::serve(port, Arc::new(AppState { aggregator })).await
}
