//! Scalar contribution totals and their text report.

use cgraph_common::Provider;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Totals reported by the GitHub contributions collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubStats {
    /// Commit contributions
    pub commits: u64,
    /// Issues opened
    pub issues: u64,
    /// Pull requests opened
    pub pull_requests: u64,
    /// Pull request reviews
    pub pull_request_reviews: u64,
    /// Repositories with contributed commits
    pub repositories: u64,
    /// Calendar total
    pub total_contributions: u64,
}

/// Totals derived from GitLab user events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabStats {
    /// Push events
    pub pushed_commits: u64,
    /// Merged merge requests
    pub merged_merge_requests: u64,
    /// Comments on any noteable
    pub comments: u64,
    /// All events
    pub total_contributions: u64,
}

/// Stats of one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderStats {
    /// GitHub totals
    GitHub(GithubStats),
    /// GitLab totals
    GitLab(GitlabStats),
}

impl ProviderStats {
    /// Provider these stats belong to.
    pub const fn provider(&self) -> Provider {
        match self {
            Self::GitHub(_) => Provider::GitHub,
            Self::GitLab(_) => Provider::GitLab,
        }
    }
}

/// Stats of every provider that reported them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionStats {
    /// GitHub totals, if GitHub reported
    pub github: Option<GithubStats>,
    /// GitLab totals, if GitLab reported
    pub gitlab: Option<GitlabStats>,
}

impl ContributionStats {
    /// Stores `stats` under its provider, replacing earlier values.
    pub fn record(&mut self, stats: ProviderStats) {
        match stats {
            ProviderStats::GitHub(s) => self.github = Some(s),
            ProviderStats::GitLab(s) => self.gitlab = Some(s),
        }
    }

    /// Whether no provider reported.
    pub const fn is_empty(&self) -> bool {
        self.github.is_none() && self.gitlab.is_none()
    }
}

impl FromIterator<ProviderStats> for ContributionStats {
    fn from_iter<T: IntoIterator<Item = ProviderStats>>(iter: T) -> Self {
        let mut stats = Self::default();
        for s in iter {
            stats.record(s);
        }
        stats
    }
}

/// Renders the stats block printed at the end of a run.
pub fn format_stats(stats: &ContributionStats) -> String {
    let mut out = String::new();

    if let Some(gh) = &stats.github {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "--- GitHub ---\n\
             Contributions on GitHub: {}\n\
             --- GitHub: Other stats ---\n\
             Total pull requests: {}\n\
             Total commit contributions: {}\n\
             Total issues opened: {}\n\
             Total pull request reviews: {}\n\
             Total repositories contributed: {}\n",
            gh.total_contributions,
            gh.pull_requests,
            gh.commits,
            gh.issues,
            gh.pull_request_reviews,
            gh.repositories,
        );
    }

    if let Some(gl) = &stats.gitlab {
        let _ = write!(
            out,
            "--- GitLab ---\n\
             Contributions on GitLab: {}\n\
             --- GitLab: Other stats ---\n\
             Total merge requests: {}\n\
             Total submitted comments: {}\n\
             Total commit contributions: {}\n",
            gl.total_contributions, gl.merged_merge_requests, gl.comments, gl.pushed_commits,
        );
    }

    if out.is_empty() {
        out.push_str("No contribution statistics reported\n");
    }
    out
}

impl fmt::Display for ContributionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_stats(self))
    }
}
