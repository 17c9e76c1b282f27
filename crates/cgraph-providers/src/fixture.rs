//! Recorded provider responses read from disk instead of the network.

use crate::github::{parse_github_response, GithubResponse};
use crate::gitlab::parse_gitlab_calendar;
use crate::source::{ContributionSource, FetchWindow, ProviderReport};
use async_trait::async_trait;
use cgraph_common::{CGraphError, Provider, Result};
use cgraph_graphs::GitlabStats;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// File name of a provider's recorded response inside the fixture directory.
pub const fn fixture_file_name(provider: Provider) -> &'static str {
    match provider {
        Provider::GitHub => "github-response.json",
        Provider::GitLab => "gitlab-calendar.json",
    }
}

/// Source replaying a recorded response for one provider.
///
/// The fetch window is ignored; the fixture is returned as recorded.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    provider: Provider,
    path: PathBuf,
}

impl FixtureSource {
    /// Creates a source reading `provider`'s fixture from `dir`.
    pub fn new(provider: Provider, dir: impl AsRef<Path>) -> Self {
        Self {
            provider,
            path: dir.as_ref().join(fixture_file_name(provider)),
        }
    }

    /// File the source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CGraphError::config_with_source(
                format!("Failed to read fixture {}", self.path.display()),
                e,
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CGraphError::config_with_source(
                format!("Invalid fixture {}", self.path.display()),
                e,
            )
        })
    }
}

#[async_trait]
impl ContributionSource for FixtureSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    #[instrument(skip(self), fields(provider = %self.provider, path = %self.path.display()))]
    async fn fetch(&self, _window: FetchWindow) -> Result<ProviderReport> {
        debug!("Reading recorded response");
        let report = match self.provider {
            Provider::GitHub => parse_github_response(self.read_json::<GithubResponse>().await?)?,
            Provider::GitLab => {
                let calendar: HashMap<String, u64> = self.read_json().await?;
                parse_gitlab_calendar(calendar, Some(GitlabStats::default()))
            }
        };
        info!(
            days = report.daily.len(),
            total = report.daily.total(),
            "Loaded fixture contributions"
        );
        Ok(report)
    }
}
