//! Builds the sources a configuration asks for.

use crate::fixture::FixtureSource;
use crate::github::GitHubSource;
use crate::gitlab::GitLabSource;
use crate::source::ContributionSource;
use cgraph_common::{Provider, Result};
use cgraph_config::{Config, SourceMode};
use std::sync::Arc;
use tracing::debug;

/// Shared handle to a contribution source.
pub type SharedSource = Arc<dyn ContributionSource>;

/// One source per enabled provider, live or fixture depending on `data.mode`.
pub fn sources_from_config(config: &Config) -> Result<Vec<SharedSource>> {
    config
        .enabled_providers()
        .into_iter()
        .map(|provider| -> Result<SharedSource> {
            debug!(%provider, mode = ?config.data.mode, "Creating contribution source");
            let source: SharedSource = match (config.data.mode, provider) {
                (SourceMode::Fixture, _) => {
                    Arc::new(FixtureSource::new(provider, &config.data.fixture_dir))
                }
                (SourceMode::Live, Provider::GitHub) => Arc::new(GitHubSource::new(&config.github)?),
                (SourceMode::Live, Provider::GitLab) => Arc::new(GitLabSource::new(&config.gitlab)?),
            };
            Ok(source)
        })
        .collect()
}
