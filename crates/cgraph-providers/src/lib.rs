//! # cgraph Providers
//!
//! Contribution sources for contrib-graph.
//!
//! Each source turns one provider's answer into a [`ProviderReport`]: a
//! per-day contribution map plus optional scalar statistics. Live sources
//! talk to the GitHub GraphQL API and the GitLab calendar and events
//! endpoints through a rate-limited, retrying HTTP client. Fixture sources
//! replay recorded responses from disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod fixture;
pub mod github;
pub mod gitlab;
pub mod http;
pub mod registry;
pub mod source;

pub use fixture::{fixture_file_name, FixtureSource};
pub use github::{parse_github_response, GitHubSource, GithubResponse};
pub use gitlab::{parse_gitlab_calendar, parse_total, EventAction, GitLabSource};
pub use http::{HttpClient, HttpSettings};
pub use registry::{sources_from_config, SharedSource};
pub use source::{ContributionSource, FetchWindow, ProviderReport};

#[cfg(any(test, feature = "testing"))]
pub use source::MockContributionSource;
