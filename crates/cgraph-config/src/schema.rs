//! Configuration schema definitions using serde.

use cgraph_common::{days_before, CGraphError, LoggingConfig, Provider};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for contrib-graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub provider configuration.
    pub github: GitHubConfig,
    /// GitLab provider configuration.
    pub gitlab: GitLabConfig,
    /// Data collection configuration.
    pub data: DataConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// GitHub GraphQL API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Whether GitHub contributions are collected.
    pub enabled: bool,
    /// GitHub login whose contributions are collected.
    pub user: String,
    /// Personal access token.
    pub token: String,
    /// API root; the GraphQL endpoint is `{api_url}/graphql`.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum retry attempts for transient failures.
    pub max_retries: usize,
    /// Requests per second.
    pub rate_limit_per_sec: u32,
}

/// GitLab API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    /// Whether GitLab contributions are collected.
    pub enabled: bool,
    /// GitLab username.
    pub user: String,
    /// Personal access token, needed only for the event statistics.
    pub token: String,
    /// Instance root, e.g. `https://gitlab.com`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum retry attempts for transient failures.
    pub max_retries: usize,
    /// Requests per second.
    pub rate_limit_per_sec: u32,
}

/// Where contribution data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Query the provider APIs.
    Live,
    /// Read recorded provider responses from `fixture_dir`.
    Fixture,
}

/// Data collection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Live or fixture data.
    pub mode: SourceMode,
    /// Directory holding recorded provider responses.
    pub fixture_dir: PathBuf,
    /// Explicit start date; `lookback_days` before today when unset.
    pub since: Option<NaiveDate>,
    /// Default window length in days.
    pub lookback_days: u32,
    /// Drop contributions dated before `since` prior to bucketing.
    pub clip_to_since: bool,
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Plain line.
    Solid,
    /// Dashed line.
    Dashed,
    /// Line with the area below it filled.
    Area,
}

/// Presentation of one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Legend label.
    pub name: String,
    /// `#RRGGBB` color.
    pub color: String,
    /// Line style.
    pub line_style: LineStyle,
}

impl SeriesStyle {
    /// Creates a series style.
    pub fn new(name: impl Into<String>, color: impl Into<String>, line_style: LineStyle) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            line_style,
        }
    }
}

/// Styles for each provider series and the combined series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStylesConfig {
    /// GitHub series.
    pub github: SeriesStyle,
    /// GitLab series.
    pub gitlab: SeriesStyle,
    /// Sum of all providers.
    pub combined: SeriesStyle,
}

impl SeriesStylesConfig {
    /// Style of a provider's own series.
    pub fn for_provider(&self, provider: Provider) -> &SeriesStyle {
        match provider {
            Provider::GitHub => &self.github,
            Provider::GitLab => &self.gitlab,
        }
    }
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Whether a chart file is rendered at all.
    pub enabled: bool,
    /// Chart caption.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Output file; `.svg` selects the SVG backend, anything else PNG.
    pub output: PathBuf,
    /// `#RRGGBB` background color.
    pub background: String,
    /// Add a combined series when more than one provider reports.
    pub show_combined: bool,
    /// Series styles.
    pub series: SeriesStylesConfig,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CGraphError> {
        crate::validator::ConfigValidator::validate(self)
    }

    /// Providers enabled in this configuration, in reporting order.
    pub fn enabled_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|provider| match provider {
                Provider::GitHub => self.github.enabled,
                Provider::GitLab => self.gitlab.enabled,
            })
            .collect()
    }
}

impl DataConfig {
    /// Effective start of the collection window.
    pub fn resolve_since(&self, today: NaiveDate) -> NaiveDate {
        self.since
            .unwrap_or_else(|| days_before(today, self.lookback_days))
    }

    /// Date to clip contributions at, if clipping is enabled.
    pub fn clip_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.clip_to_since.then(|| self.resolve_since(today))
    }
}
