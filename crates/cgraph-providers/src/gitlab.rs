//! GitLab contributions from the public calendar and the events API.

use crate::http::{header_u64, join_segments, HttpClient, HttpSettings};
use crate::source::{ContributionSource, FetchWindow, ProviderReport};
use async_trait::async_trait;
use cgraph_common::{redact_token, CGraphError, Provider, Result};
use cgraph_config::GitLabConfig;
use cgraph_graphs::{format_date, GitlabStats, ProviderStats};
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use url::Url;

/// Header carrying the number of matching events.
pub const TOTAL_HEADER: &str = "X-Total";

/// Event filters counted for the stats block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    /// Pushes
    Pushed,
    /// Merged merge requests
    Merged,
    /// Comments
    Commented,
}

impl EventAction {
    /// Value of the `action` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pushed => "pushed",
            Self::Merged => "merged",
            Self::Commented => "commented",
        }
    }
}

/// Reads the event count from a HEAD answer.
pub fn parse_total(headers: &HeaderMap) -> Result<u64> {
    header_u64(headers, TOTAL_HEADER).ok_or_else(|| {
        CGraphError::provider(Provider::GitLab, format!("{} header not found", TOTAL_HEADER))
    })
}

/// Turns a `calendar.json` payload into a report.
pub fn parse_gitlab_calendar(
    calendar: HashMap<String, u64>,
    stats: Option<GitlabStats>,
) -> ProviderReport {
    ProviderReport::from_raw(Provider::GitLab, calendar, stats.map(ProviderStats::GitLab))
}

/// Live GitLab source.
#[derive(Debug, Clone)]
pub struct GitLabSource {
    http: HttpClient,
    calendar_url: Url,
    events_url: Url,
    user: String,
    token: String,
}

impl GitLabSource {
    /// Creates a source from configuration.
    pub fn new(config: &GitLabConfig) -> Result<Self> {
        let http = HttpClient::new(Provider::GitLab, &HttpSettings::from(config))?;
        let calendar_url = join_segments(
            &config.base_url,
            &["users", config.user.as_str(), "calendar.json"],
        )?;
        let events_url = join_segments(
            &config.base_url,
            &["api", "v4", "users", config.user.as_str(), "events"],
        )?;
        info!(
            user = %config.user,
            token = %redact_token(&config.token),
            base_url = %config.base_url,
            "Configured GitLab source"
        );
        Ok(Self {
            http,
            calendar_url,
            events_url,
            user: config.user.clone(),
            token: config.token.clone(),
        })
    }

    /// Public calendar URL.
    pub const fn calendar_url(&self) -> &Url {
        &self.calendar_url
    }

    /// Events API URL.
    pub const fn events_url(&self) -> &Url {
        &self.events_url
    }

    /// Whether event stats can be queried.
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    async fn count_events(&self, window: FetchWindow, action: Option<EventAction>) -> Result<u64> {
        let mut query = vec![("after", format_date(window.since))];
        if let Some(action) = action {
            query.push(("action", action.as_str().to_string()));
        }
        let headers = self
            .http
            .head(&self.events_url, &query, Some(&self.token))
            .await?;
        parse_total(&headers)
    }

    async fn fetch_stats(&self, window: FetchWindow) -> Result<GitlabStats> {
        let (pushed_commits, merged_merge_requests, comments, total_contributions) = futures::try_join!(
            self.count_events(window, Some(EventAction::Pushed)),
            self.count_events(window, Some(EventAction::Merged)),
            self.count_events(window, Some(EventAction::Commented)),
            self.count_events(window, None),
        )?;
        Ok(GitlabStats {
            pushed_commits,
            merged_merge_requests,
            comments,
            total_contributions,
        })
    }
}

#[async_trait]
impl ContributionSource for GitLabSource {
    fn provider(&self) -> Provider {
        Provider::GitLab
    }

    #[instrument(skip(self), fields(user = %self.user))]
    async fn fetch(&self, window: FetchWindow) -> Result<ProviderReport> {
        let calendar: HashMap<String, u64> = self.http.get_json(&self.calendar_url, None).await?;

        let stats = if self.has_token() {
            Some(self.fetch_stats(window).await?)
        } else {
            debug!("No GitLab token configured, skipping event stats");
            None
        };

        let report = parse_gitlab_calendar(calendar, stats);
        info!(days = report.daily.len(), total = report.daily.total(), "Fetched GitLab contributions");
        Ok(report)
    }
}
