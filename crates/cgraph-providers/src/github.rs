//! GitHub contributions through the GraphQL `contributionsCollection`.

use crate::http::{join_segments, HttpClient, HttpSettings};
use crate::source::{ContributionSource, FetchWindow, ProviderReport};
use async_trait::async_trait;
use cgraph_common::{redact_token, CGraphError, Provider, Result};
use cgraph_config::GitHubConfig;
use cgraph_graphs::{GithubStats, ProviderStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use url::Url;

/// Longest window the contributions collection accepts.
pub const MAX_WINDOW_DAYS: u32 = 365;

const CONTRIBUTIONS_QUERY: &str = r"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    name
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      totalRepositoriesWithContributedCommits
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
            weekday
          }
        }
      }
    }
  }
}";

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    login: &'a str,
    from: String,
    to: String,
}

/// Top-level GraphQL answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubResponse {
    /// Query result, absent on hard failures
    #[serde(default)]
    pub data: Option<GithubData>,
    /// GraphQL errors
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// `data` object of the answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubData {
    /// `null` when the login does not exist
    pub user: Option<GithubUser>,
}

/// One GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    /// Human readable message
    pub message: String,
}

/// Queried user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubUser {
    /// Display name
    pub name: Option<String>,
    /// Contributions in the requested range
    pub contributions_collection: ContributionsCollection,
}

/// Totals and calendar of the requested range.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    /// Commit contributions
    pub total_commit_contributions: u64,
    /// Issues opened
    pub total_issue_contributions: u64,
    /// Pull requests opened
    pub total_pull_request_contributions: u64,
    /// Pull request reviews
    pub total_pull_request_review_contributions: u64,
    /// Repositories with contributed commits
    pub total_repositories_with_contributed_commits: u64,
    /// Per-day calendar
    pub contribution_calendar: ContributionCalendar,
}

/// Calendar grouped in weeks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    /// Sum of all days
    pub total_contributions: u64,
    /// Weeks, oldest first
    pub weeks: Vec<ContributionWeek>,
}

/// One calendar week.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    /// Days of the week present in the range
    pub contribution_days: Vec<ContributionDay>,
}

/// One calendar day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// Contributions on the day
    pub contribution_count: u64,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Turns a GraphQL answer into a report.
///
/// GraphQL errors and unknown users become provider errors. Counts of the
/// same date appearing in several weeks are summed.
pub fn parse_github_response(response: GithubResponse) -> Result<ProviderReport> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(CGraphError::provider(Provider::GitHub, messages.join("; ")));
    }

    let user = response
        .data
        .and_then(|data| data.user)
        .ok_or_else(|| CGraphError::provider(Provider::GitHub, "User not found"))?;
    let collection = user.contributions_collection;

    let mut raw: HashMap<String, u64> = HashMap::new();
    for day in collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
    {
        let total = raw.entry(day.date).or_insert(0);
        *total = total.saturating_add(day.contribution_count);
    }

    let stats = GithubStats {
        commits: collection.total_commit_contributions,
        issues: collection.total_issue_contributions,
        pull_requests: collection.total_pull_request_contributions,
        pull_request_reviews: collection.total_pull_request_review_contributions,
        repositories: collection.total_repositories_with_contributed_commits,
        total_contributions: collection.contribution_calendar.total_contributions,
    };

    Ok(ProviderReport::from_raw(
        Provider::GitHub,
        raw,
        Some(ProviderStats::GitHub(stats)),
    ))
}

fn start_of_day(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format(cgraph_common::DATE_FORMAT))
}

fn end_of_day(date: NaiveDate) -> String {
    format!("{}T23:59:59Z", date.format(cgraph_common::DATE_FORMAT))
}

/// Live GitHub source.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    http: HttpClient,
    endpoint: Url,
    user: String,
    token: String,
}

impl GitHubSource {
    /// Creates a source from configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let http = HttpClient::new(Provider::GitHub, &HttpSettings::from(config))?;
        let endpoint = join_segments(&config.api_url, &["graphql"])?;
        info!(
            user = %config.user,
            token = %redact_token(&config.token),
            endpoint = %endpoint,
            "Configured GitHub source"
        );
        Ok(Self {
            http,
            endpoint,
            user: config.user.clone(),
            token: config.token.clone(),
        })
    }

    /// GraphQL endpoint queried.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContributionSource for GitHubSource {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    #[instrument(skip(self), fields(user = %self.user))]
    async fn fetch(&self, window: FetchWindow) -> Result<ProviderReport> {
        let clamped = window.clamp_days(MAX_WINDOW_DAYS);
        if clamped != window {
            warn!(
                since = %clamped.since,
                until = %clamped.until,
                "GitHub only reports one year at a time; window shortened"
            );
        }

        let request = GraphqlRequest {
            query: CONTRIBUTIONS_QUERY,
            variables: Variables {
                login: &self.user,
                from: start_of_day(clamped.since),
                to: end_of_day(clamped.until),
            },
        };
        let response: GithubResponse = self
            .http
            .post_json(&self.endpoint, &request, Some(&self.token))
            .await?;

        let report = parse_github_response(response)?;
        info!(days = report.daily.len(), total = report.daily.total(), "Fetched GitHub contributions");
        Ok(report)
    }
}
