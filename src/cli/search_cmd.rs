//! One-shot aggregated search from the command line.

use crate::aggregator::{Aggregator, SearchRequest};
use crate::config::{EngineConfig, SearchLimits};
use crate::error::SearchError;
use crate::renderer::chromium::ChromiumLauncher;
use crate::sources::SourceRegistry;
use anyhow::{bail, Context, Result};
use std::sync::Arc;

/// Run one search and print the response as pretty JSON.
pub async fn run(query: &str, sources: Option<&str>) -> Result<()> {
    let aggregator = Aggregator::new(
        SourceRegistry::builtin(),
        Arc::new(ChromiumLauncher::new(EngineConfig::from_env())),
        SearchLimits::from_env(),
    );

    let source_keys = sources.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });
    let request = SearchRequest {
        query: query.to_string(),
        source_keys,
    };

    match aggregator.search(&request).await {
        Ok(response) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .context("failed to serialize response")?
            );
            Ok(())
        }
        Err(SearchError::InvalidQuery) => bail!("query must not be empty"),
        Err(SearchError::Engine(e)) => Err(e.context("failed to launch the rendering engine")),
    }
}
