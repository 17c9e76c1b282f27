//! Default values for every configuration section.

use crate::schema::*;
use cgraph_common::LoggingConfig;
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            gitlab: GitLabConfig::default(),
            data: DataConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user: String::new(),
            token: String::new(),
            api_url: "https://api.github.com".to_string(),
            timeout_seconds: 10,
            max_retries: 3,
            rate_limit_per_sec: 5,
        }
    }
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user: String::new(),
            token: String::new(),
            base_url: "https://gitlab.com".to_string(),
            timeout_seconds: 10,
            max_retries: 3,
            rate_limit_per_sec: 5,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Live,
            fixture_dir: PathBuf::from("fixtures"),
            since: None,
            lookback_days: 365,
            clip_to_since: false,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Contribution graph".to_string(),
            width: 1200,
            height: 600,
            output: PathBuf::from("out/images/contributions.png"),
            background: "#ffffff".to_string(),
            show_combined: true,
            series: SeriesStylesConfig::default(),
        }
    }
}

impl Default for SeriesStylesConfig {
    fn default() -> Self {
        Self {
            github: SeriesStyle::new("GitHub", "#1f77b4", LineStyle::Solid),
            gitlab: SeriesStyle::new("GitLab", "#ff7f0e", LineStyle::Solid),
            combined: SeriesStyle::new("Combined", "#2ca02c", LineStyle::Area),
        }
    }
}
